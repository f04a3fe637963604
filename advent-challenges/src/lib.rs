//! Advent of Code puzzle solutions with automatic registration
//!
//! This crate contains puzzle solutions organized by year, together with the
//! grid utilities they share. Each solution uses the `AutoRegisterSolver`
//! derive macro for automatic plugin registration with the solver framework,
//! so linking this crate is enough for the runner to discover them.

pub mod utils;

#[cfg(feature = "my-solutions")]
pub mod my_solutions;

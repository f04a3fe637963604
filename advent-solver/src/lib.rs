//! Advent of Code Solver Library
//!
//! A small type-safe framework for running Advent of Code challenges across
//! multiple years and days. Each challenge has a load step (parsing its input
//! into shared data) and one solve step per part.
//!
//! # Overview
//!
//! This library provides:
//! - A trait-based interface for defining solvers ([`AocParser`], [`PartSolver`], [`Solver`])
//! - Type-erased, timed solver instances ([`DynSolver`])
//! - A static registry keyed by (year, day) ([`SolverRegistry`])
//! - Compile-time plugin registration through `#[derive(AutoRegisterSolver)]`
//!
//! # Quick Example
//!
//! ```
//! use advent_solver::{AocParser, ParseError, PartSolver, SolveError, AocSolver, SolverRegistryBuilder};
//!
//! #[derive(AocSolver)]
//! #[aoc_solver(max_parts = 2)]
//! pub struct CalorieCounting;
//!
//! impl AocParser for CalorieCounting {
//!     type SharedData<'a> = Vec<u32>;
//!
//!     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
//!         input
//!             .split("\n\n")
//!             .map(|elf| {
//!                 elf.lines()
//!                     .map(|l| l.parse::<u32>().map_err(|e| ParseError::InvalidFormat(e.to_string())))
//!                     .sum()
//!             })
//!             .collect()
//!     }
//! }
//!
//! impl PartSolver<1> for CalorieCounting {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.iter().max().copied().unwrap_or_default().to_string())
//!     }
//! }
//!
//! impl PartSolver<2> for CalorieCounting {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         shared.sort_unstable_by(|a, b| b.cmp(a));
//!         Ok(shared.iter().take(3).sum::<u32>().to_string())
//!     }
//! }
//!
//! let registry = SolverRegistryBuilder::new()
//!     .register_solver::<CalorieCounting>(2022, 1, "Calorie Counting")
//!     .unwrap()
//!     .build();
//!
//! let mut solver = registry.create_solver(2022, 1, "1\n2\n\n4\n\n3").unwrap();
//! assert_eq!(solver.solve(1).unwrap().answer, "4");
//! assert_eq!(solver.solve(2).unwrap().answer, "10");
//! ```
//!
//! # Key Concepts
//!
//! ## Solver Traits
//!
//! - [`AocParser`] defines the shared data type and the load step.
//! - [`PartSolver<N>`] solves part `N` with mutable access to the shared data,
//!   so part 2 can reuse whatever part 1 computed.
//! - [`Solver`] dispatches a runtime part number; `#[derive(AocSolver)]`
//!   writes it for you.
//!
//! ## Registration
//!
//! ```ignore
//! #[derive(AocSolver, AutoRegisterSolver)]
//! #[aoc_solver(max_parts = 2)]
//! #[aoc(year = 2022, day = 8, name = "Treetop Tree House", tags = ["grid"])]
//! pub struct Solver;
//! ```
//!
//! The derive submits a [`SolverPlugin`] at compile time.
//! [`SolverRegistryBuilder::register_all_plugins`] collects them into the
//! registry when the program starts; there is no runtime discovery.

mod error;
mod instance;
mod registry;
mod solver;

// Re-export public API
pub use error::{ParseError, RegistrationError, SolveError, SolverError};
pub use instance::{DynSolver, SolveResult, SolverInstance};
pub use registry::{
    FactoryInfo, RegisterableSolver, SolverFactory, SolverFactoryStorage, SolverPlugin,
    SolverRegistry, SolverRegistryBuilder, BASE_YEAR, CAPACITY, DAYS_PER_YEAR, MAX_YEARS,
};
pub use solver::{AocParser, PartSolver, Solver, SolverExt};

// Re-export inventory for use by the derive macro
pub use inventory;

// Re-export the derive macros
pub use advent_solver_macros::{AocSolver, AutoRegisterSolver};

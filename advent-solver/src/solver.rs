//! Challenge lifecycle: load the input once, then solve parts against it
//!
//! A challenge is split along the two steps the runner times separately:
//!
//! 1. **Load**: [`AocParser::parse`] turns the raw input into the challenge's
//!    shared data. It runs once per input.
//! 2. **Solve**: each part reads (and may update) that shared data through
//!    [`PartSolver<N>`]. [`Solver::solve_part`] maps a runtime part number onto
//!    the matching `PartSolver` and is normally written by `#[derive(AocSolver)]`.
//!
//! ```
//! use advent_solver::{AocParser, ParseError, PartSolver, SolveError, Solver, SolverExt};
//!
//! struct Depths;
//!
//! impl AocParser for Depths {
//!     type SharedData<'a> = Vec<u32>;
//!
//!     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
//!         input
//!             .split_whitespace()
//!             .map(|n| n.parse().map_err(|_| ParseError::InvalidFormat(n.to_string())))
//!             .collect()
//!     }
//! }
//!
//! impl PartSolver<1> for Depths {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.windows(2).filter(|w| w[1] > w[0]).count().to_string())
//!     }
//! }
//!
//! impl PartSolver<2> for Depths {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.windows(4).filter(|w| w[3] > w[0]).count().to_string())
//!     }
//! }
//!
//! impl Solver for Depths {
//!     const PARTS: u8 = 2;
//!
//!     fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
//!         match part {
//!             1 => <Self as PartSolver<1>>::solve(shared),
//!             2 => <Self as PartSolver<2>>::solve(shared),
//!             _ => Err(SolveError::PartNotImplemented(part)),
//!         }
//!     }
//! }
//!
//! let mut shared = Depths::parse("199 200 208 210 200 207 240 269 260 263").unwrap();
//! assert_eq!(Depths::solve_part_checked_range(&mut shared, 1).unwrap(), "7");
//! assert_eq!(Depths::solve_part_checked_range(&mut shared, 2).unwrap(), "5");
//! assert!(Depths::solve_part_checked_range(&mut shared, 3).is_err());
//! ```

use std::ops::RangeInclusive;

use crate::error::{ParseError, SolveError};

/// The load step of a challenge.
pub trait AocParser {
    /// Parsed input, shared by every part.
    ///
    /// The lifetime lets it borrow from the input when no transformation is
    /// needed; most challenges own a `Vec`, a grid or a small struct instead.
    type SharedData<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError>;
}

/// Solve step for part `N`.
///
/// The shared data is borrowed mutably so a part can leave results behind for
/// the parts that run after it on the same load.
pub trait PartSolver<const N: u8>: AocParser {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError>;
}

/// A complete challenge: one load step and `PARTS` solve steps.
pub trait Solver: AocParser {
    const PARTS: u8;

    /// Run part `part`. Parts without an implementation answer
    /// [`SolveError::PartNotImplemented`].
    fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError>;
}

/// Entry points shared by every [`Solver`]
pub trait SolverExt: Solver {
    /// Part numbers this challenge answers, `1..=PARTS`.
    fn part_range() -> RangeInclusive<u8> {
        1..=Self::PARTS
    }

    /// Like [`Solver::solve_part`], but rejects part numbers outside
    /// [`part_range`](SolverExt::part_range) with [`SolveError::PartOutOfRange`].
    fn solve_part_checked_range(
        shared: &mut Self::SharedData<'_>,
        part: u8,
    ) -> Result<String, SolveError> {
        if !Self::part_range().contains(&part) {
            return Err(SolveError::PartOutOfRange(part));
        }
        Self::solve_part(shared, part)
    }
}

impl<T: Solver + ?Sized> SolverExt for T {}

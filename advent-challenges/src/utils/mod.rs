//! Helpers shared by the puzzle solutions

pub mod grid;

use advent_solver::{ParseError, SolveError};
use anyhow::anyhow;

use grid::GridError;

/// Parse every non-blank line of `input` with `parse_line`.
///
/// Failures are reported as [`ParseError::InvalidFormat`] carrying the
/// 1-based line number of the offending line.
pub fn parse_lines<T, F>(input: &str, mut parse_line: F) -> Result<Vec<T>, ParseError>
where
    F: FnMut(&str) -> anyhow::Result<T>,
{
    input
        .lines()
        .enumerate()
        .map(|(line_idx, line)| (line_idx, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .map(|(line_idx, line)| {
            parse_line(line).map_err(|e| anyhow!("(line {}) {}", line_idx + 1, e))
        })
        .collect::<anyhow::Result<Vec<_>>>()
        .map_err(|e| ParseError::InvalidFormat(e.to_string()))
}

impl From<GridError> for ParseError {
    fn from(error: GridError) -> Self {
        ParseError::InvalidFormat(error.to_string())
    }
}

impl From<GridError> for SolveError {
    fn from(error: GridError) -> Self {
        SolveError::failed(error)
    }
}

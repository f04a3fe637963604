use std::collections::HashMap;

use advent_solver::{AocParser, ParseError, PartSolver, SolveError};
use advent_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

use crate::utils::grid::{Grid, GridError, Point};

const GEAR: char = '*';

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 3, name = "Gear Ratios", tags = ["grid"])]
pub struct Solver;

#[derive(Debug)]
pub struct Schematic {
    grid: Grid<char>,
    numbers: Vec<PartNumber>,
}

/// A run of digits on one line of the schematic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartNumber {
    value: u64,
    cells: Vec<Point>,
}

impl AocParser for Solver {
    type SharedData<'a> = Schematic;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let grid = Grid::parse_chars(input)?;
        let numbers = find_numbers(&grid)?;
        tracing::debug!(numbers = numbers.len(), "scanned schematic");
        Ok(Schematic { grid, numbers })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut total = 0u64;
        for number in &shared.numbers {
            if touches(&shared.grid, number, is_symbol)? {
                total = total
                    .checked_add(number.value)
                    .ok_or_else(|| SolveError::failed("part number sum overflows u64"))?;
            }
        }
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut gears: HashMap<Point, Vec<u64>> = HashMap::new();
        for number in &shared.numbers {
            for gear in adjacent_points(&shared.grid, number, |c| c == GEAR)? {
                gears.entry(gear).or_default().push(number.value);
            }
        }

        let ratio_sum = gears
            .values()
            .filter(|values| values.len() == 2)
            .try_fold(0u64, |sum, values| {
                values[0]
                    .checked_mul(values[1])
                    .and_then(|ratio| sum.checked_add(ratio))
            })
            .ok_or_else(|| SolveError::failed("gear ratio sum overflows u64"))?;
        Ok(ratio_sum.to_string())
    }
}

fn is_symbol(c: char) -> bool {
    c != '.' && !c.is_ascii_digit()
}

/// Digit runs, row by row. A run never continues onto the next line.
fn find_numbers(grid: &Grid<char>) -> Result<Vec<PartNumber>, ParseError> {
    let mut numbers = Vec::new();
    for x in 0..grid.width() {
        let row = grid.row(x)?;
        let runs = row
            .iter()
            .enumerate()
            .chunk_by(|(_, c)| c.is_ascii_digit());
        for (is_digit, run) in &runs {
            if !is_digit {
                continue;
            }
            let (cells, digits): (Vec<Point>, String) = run
                .map(|(y, c)| (Point::new(x as isize, y as isize), *c))
                .unzip();
            let value = digits.parse().map_err(|e| {
                ParseError::InvalidFormat(format!("(line {}) part number '{}': {}", x + 1, digits, e))
            })?;
            numbers.push(PartNumber { value, cells });
        }
    }
    Ok(numbers)
}

fn touches<F>(grid: &Grid<char>, number: &PartNumber, predicate: F) -> Result<bool, GridError>
where
    F: Fn(char) -> bool,
{
    for &cell in &number.cells {
        let hits = grid.all_neighbors_where(cell, |point, &c| {
            !number.cells.contains(&point) && predicate(c)
        })?;
        if !hits.is_empty() {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Distinct neighbor positions of `number` whose character matches `predicate`.
fn adjacent_points<F>(grid: &Grid<char>, number: &PartNumber, predicate: F) -> Result<Vec<Point>, GridError>
where
    F: Fn(char) -> bool,
{
    let mut points = Vec::new();
    for &cell in &number.cells {
        points.extend(grid.all_neighbor_points(cell)?.filter(|&point| predicate(grid[point])));
    }
    Ok(points.into_iter().unique().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use advent_solver::SolverExt;

    const EXAMPLE: &str = "\
467..114..
...*......
..35..633.
......#...
617*......
.....+.58.
..592.....
......755.
...$.*....
.664.598..
";

    #[test]
    fn test_part_number_sum() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part_checked_range(&mut shared, 1).unwrap(), "4361");
    }

    #[test]
    fn test_gear_ratio_sum() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part_checked_range(&mut shared, 2).unwrap(), "467835");
    }

    #[test]
    fn test_numbers_split_at_line_end() {
        let schematic = Solver::parse("..12\n34..\n").unwrap();
        let values: Vec<u64> = schematic.numbers.iter().map(|n| n.value).collect();

        assert_eq!(values, vec![12, 34]);
        assert_eq!(schematic.numbers[0].cells, vec![Point::new(0, 2), Point::new(0, 3)]);
    }

    #[test]
    fn test_diagonal_symbol_counts() {
        let mut shared = Solver::parse("5..\n.#.\n..7\n").unwrap();
        assert_eq!(Solver::solve_part_checked_range(&mut shared, 1).unwrap(), "12");
    }

    #[test]
    fn test_gear_needs_exactly_two_numbers() {
        let mut one = Solver::parse("2*.\n...\n").unwrap();
        assert_eq!(Solver::solve_part_checked_range(&mut one, 2).unwrap(), "0");

        let mut three = Solver::parse("2*3\n.4.\n").unwrap();
        assert_eq!(Solver::solve_part_checked_range(&mut three, 2).unwrap(), "0");

        let mut two = Solver::parse("2*3\n...\n").unwrap();
        assert_eq!(Solver::solve_part_checked_range(&mut two, 2).unwrap(), "6");
    }

    #[test]
    fn test_oversized_part_number_is_rejected() {
        let input = ".........................\n123456789012345678901234*\n";
        assert!(matches!(
            Solver::parse(input),
            Err(ParseError::InvalidFormat(message)) if message.starts_with("(line 2)")
        ));
    }

    #[test]
    fn test_gear_ratio_overflow_fails() {
        let mut shared = Solver::parse("9999999999999999999*9999999999999999999\n").unwrap();
        assert!(matches!(
            Solver::solve_part_checked_range(&mut shared, 2),
            Err(SolveError::SolveFailed(_))
        ));
        assert!(matches!(
            Solver::solve_part_checked_range(&mut shared, 1),
            Err(SolveError::SolveFailed(_))
        ));
    }
}

use advent_solver::{AocParser, ParseError, PartSolver, SolveError};
use advent_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::{Grid, GridError, Point};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 8, name = "Treetop Tree House", tags = ["grid"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Grid<u8>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let chars = Grid::parse_chars(input)?;
        chars
            .try_map(|point, c| {
                c.to_digit(10).map(|height| height as u8).ok_or_else(|| {
                    ParseError::InvalidFormat(format!("(line {}) '{}' is not a tree height", point.x + 1, c))
                })
            })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut visible = 0usize;
        for_each_tree(shared, |_, height, lines| {
            if lines.iter().any(|line| line.iter().all(|&tree| tree < height)) {
                visible += 1;
            }
        })?;
        Ok(visible.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut best = 0usize;
        for_each_tree(shared, |point, height, lines| {
            let score: usize = lines
                .iter()
                .map(|line| viewing_distance(line, height))
                .product();
            if score > best {
                tracing::debug!(%point, score, "new best scenic score");
                best = score;
            }
        })?;
        Ok(best.to_string())
    }
}

/// Calls `visit` for every tree with its lines of sight in the order up,
/// down, left, right. Each line starts at the nearest tree.
fn for_each_tree<F>(forest: &Grid<u8>, mut visit: F) -> Result<(), GridError>
where
    F: FnMut(Point, u8, &[Vec<u8>; 4]),
{
    let columns = (0..forest.height())
        .map(|y| forest.column(y))
        .collect::<Result<Vec<_>, _>>()?;

    for x in 0..forest.width() {
        let row = forest.row(x)?;
        for (y, column) in columns.iter().enumerate() {
            let height = row[y];
            let lines = [
                column[..x].iter().rev().copied().collect(),
                column[x + 1..].to_vec(),
                row[..y].iter().rev().copied().collect(),
                row[y + 1..].to_vec(),
            ];
            visit(Point::new(x as isize, y as isize), height, &lines);
        }
    }
    Ok(())
}

/// Trees seen before the view is blocked, the blocking tree included.
fn viewing_distance(line: &[u8], height: u8) -> usize {
    line.iter()
        .position(|&tree| tree >= height)
        .map_or(line.len(), |idx| idx + 1)
}

use std::fmt;

use advent_solver::{AocParser, ParseError, PartSolver, SolveError};
use advent_solver_macros::{AocSolver, AutoRegisterSolver};
use anyhow::{anyhow, bail};
use itertools::Itertools;

use crate::utils::grid::{Grid, GridError, Point};
use crate::utils::parse_lines;

/// Column sand pours in from, at depth 0.
const SOURCE_COLUMN: isize = 500;

/// Down, down-left, down-right, in the order a grain tries them.
const FALL_STEPS: [Point; 3] = [Point::new(1, 0), Point::new(1, -1), Point::new(1, 1)];

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 14, name = "Regolith Reservoir", tags = ["grid", "simulation"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Material {
    #[default]
    Air,
    Rock,
    Sand,
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Material::Air => '.',
            Material::Rock => '#',
            Material::Sand => 'o',
        };
        write!(f, "{c}")
    }
}

/// Cave slice with depth along `x` and the puzzle's column along `y`.
///
/// The bottom row is the floor two below the deepest rock. Columns span far
/// enough either side of the source that sand resting on the floor never
/// reaches the edge.
#[derive(Debug, Clone)]
pub struct Cave {
    grid: Grid<Material>,
    source: Point,
    deepest_rock: isize,
}

/// One `a,b -> c,d -> ...` line as `(column, depth)` corners.
type RockPath = Vec<(isize, isize)>;

impl AocParser for Solver {
    type SharedData<'a> = Cave;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let paths = parse_lines(input, parse_path)?;
        if paths.is_empty() {
            return Err(ParseError::MissingData("no rock paths".into()));
        }
        Ok(build_cave(&paths)?)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut grid = shared.grid.clone();
        let mut resting = 0;
        loop {
            let grain = drop_grain(&grid, shared.source)?;
            // Anything below the deepest rock would fall forever without the floor.
            if grain.x > shared.deepest_rock {
                log_cave(&grid, grain);
                break;
            }
            grid.set(grain, Material::Sand)?;
            resting += 1;
        }
        Ok(resting.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut grid = shared.grid.clone();
        let mut resting = 0;
        loop {
            let grain = drop_grain(&grid, shared.source)?;
            grid.set(grain, Material::Sand)?;
            resting += 1;
            if grain == shared.source {
                log_cave(&grid, grain);
                break;
            }
        }
        Ok(resting.to_string())
    }
}

fn parse_path(line: &str) -> anyhow::Result<RockPath> {
    let corners = line
        .split("->")
        .map(|corner| -> anyhow::Result<(isize, isize)> {
            let (column, depth) = corner
                .trim()
                .split_once(',')
                .ok_or_else(|| anyhow!("expected 'column,depth', found '{}'", corner.trim()))?;
            let column: u16 = column.trim().parse()?;
            let depth: u16 = depth.trim().parse()?;
            Ok((column as isize, depth as isize))
        })
        .collect::<anyhow::Result<RockPath>>()?;

    for (from, to) in corners.iter().tuple_windows() {
        if from.0 != to.0 && from.1 != to.1 {
            bail!("segment {:?} -> {:?} is not horizontal or vertical", from, to);
        }
    }
    Ok(corners)
}

/// Lay every rock path into a grid that also has room for the floor.
fn build_cave(paths: &[RockPath]) -> Result<Cave, GridError> {
    let corners = || paths.iter().flatten();
    let deepest_rock = corners().map(|&(_, depth)| depth).max().unwrap_or(0);
    let floor = deepest_rock + 2;

    let min_column = corners()
        .map(|&(column, _)| column)
        .chain([SOURCE_COLUMN - floor])
        .min()
        .unwrap_or(SOURCE_COLUMN);
    let max_column = corners()
        .map(|&(column, _)| column)
        .chain([SOURCE_COLUMN + floor])
        .max()
        .unwrap_or(SOURCE_COLUMN);
    let to_point = |(column, depth): (isize, isize)| Point::new(depth, column - min_column);

    let mut grid = Grid::new((floor + 1) as usize, (max_column - min_column + 1) as usize);
    for path in paths {
        if let [single] = path.as_slice() {
            grid.set(to_point(*single), Material::Rock)?;
        }
        for (&(c1, d1), &(c2, d2)) in path.iter().tuple_windows() {
            for column in c1.min(c2)..=c1.max(c2) {
                for depth in d1.min(d2)..=d1.max(d2) {
                    grid.set(to_point((column, depth)), Material::Rock)?;
                }
            }
        }
    }
    for y in 0..grid.height() {
        grid.set(Point::new(floor, y as isize), Material::Rock)?;
    }

    Ok(Cave {
        grid,
        source: to_point((SOURCE_COLUMN, 0)),
        deepest_rock,
    })
}

/// Where a grain released at `source` comes to rest.
fn drop_grain(grid: &Grid<Material>, source: Point) -> Result<Point, GridError> {
    let mut grain = source;
    'falling: loop {
        for step in FALL_STEPS {
            let next = grain + step;
            if grid.get(next)? == Material::Air {
                grain = next;
                continue 'falling;
            }
        }
        return Ok(grain);
    }
}

fn log_cave(grid: &Grid<Material>, last_grain: Point) {
    if tracing::enabled!(tracing::Level::DEBUG) {
        let sand = grid.values().filter(|&&m| m == Material::Sand).count();
        tracing::debug!(sand, "cave:\n{}", grid.render_highlighted(&[last_grain]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use advent_solver::SolverExt;

    const EXAMPLE: &str = "\
498,4 -> 498,6 -> 496,6
503,4 -> 502,4 -> 502,9 -> 494,9
";

    #[test]
    fn test_sand_before_abyss() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part_checked_range(&mut shared, 1).unwrap(), "24");
    }

    #[test]
    fn test_sand_until_source_blocked() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part_checked_range(&mut shared, 2).unwrap(), "93");
    }

    #[test]
    fn test_parts_start_from_the_same_cave() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part_checked_range(&mut shared, 2).unwrap(), "93");
        assert_eq!(Solver::solve_part_checked_range(&mut shared, 1).unwrap(), "24");
    }

    #[test]
    fn test_cave_layout() {
        let cave = Solver::parse(EXAMPLE).unwrap();

        assert_eq!(cave.deepest_rock, 9);
        assert_eq!(cave.grid.width(), 12);
        assert_eq!(cave.grid[cave.source], Material::Air);
        assert!(cave.grid.row(11).unwrap().iter().all(|&m| m == Material::Rock));

        let first_rest = drop_grain(&cave.grid, cave.source).unwrap();
        assert_eq!(first_rest, cave.source + Point::new(8, 0));
    }

    #[test]
    fn test_rejects_bad_paths() {
        let diagonal = "498,4 -> 500,6\n";
        assert!(matches!(
            Solver::parse(diagonal),
            Err(ParseError::InvalidFormat(message)) if message.starts_with("(line 1)")
        ));

        let too_large = "498,4 -> 498,6\n70000,3 -> 70000,5\n";
        assert!(matches!(
            Solver::parse(too_large),
            Err(ParseError::InvalidFormat(message)) if message.starts_with("(line 2)")
        ));

        assert!(matches!(Solver::parse("\n\n"), Err(ParseError::MissingData(_))));
    }
}

use std::collections::VecDeque;

use advent_solver::{AocParser, ParseError, PartSolver, SolveError};
use advent_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::{Grid, GridError, Point};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 12, name = "Hill Climbing Algorithm", tags = ["grid", "bfs"])]
pub struct Solver;

#[derive(Debug)]
pub struct HeightMap {
    elevations: Grid<u8>,
    start: Point,
    end: Point,
}

impl AocParser for Solver {
    type SharedData<'a> = HeightMap;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let chars = Grid::parse_chars(input)?;
        let start = chars
            .position(|&c| c == 'S')
            .ok_or_else(|| ParseError::MissingData("no start marker 'S'".into()))?;
        let end = chars
            .position(|&c| c == 'E')
            .ok_or_else(|| ParseError::MissingData("no end marker 'E'".into()))?;

        let elevations = chars.try_map(|point, &c| match c {
            'S' => Ok(0),
            'E' => Ok(b'z' - b'a'),
            'a'..='z' => Ok(c as u8 - b'a'),
            _ => Err(ParseError::InvalidFormat(format!(
                "(line {}) '{}' is not an elevation",
                point.x + 1,
                c
            ))),
        })?;

        Ok(HeightMap {
            elevations,
            start,
            end,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let end = shared.end;
        let path = shortest_path(
            &shared.elevations,
            shared.start,
            |from, to| to <= from + 1,
            |point, _| point == end,
        )?
        .ok_or_else(|| SolveError::failed("no path from S to E"))?;

        log_path(&shared.elevations, &path);
        Ok((path.len() - 1).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        // walk downhill from E; the first lowest square reached is the best start
        let path = shortest_path(
            &shared.elevations,
            shared.end,
            |from, to| from <= to + 1,
            |_, elevation| elevation == 0,
        )?
        .ok_or_else(|| SolveError::failed("no lowest square can reach E"))?;

        log_path(&shared.elevations, &path);
        Ok((path.len() - 1).to_string())
    }
}

/// Breadth-first search over orthogonal steps allowed by `can_step(from, to)`.
///
/// Returns the visited points from `start` up to the first point accepted by
/// `is_goal`, both included, or `None` when no goal is reachable.
fn shortest_path<S, G>(
    elevations: &Grid<u8>,
    start: Point,
    can_step: S,
    is_goal: G,
) -> Result<Option<Vec<Point>>, GridError>
where
    S: Fn(u8, u8) -> bool,
    G: Fn(Point, u8) -> bool,
{
    let mut came_from: Grid<Option<Point>> = Grid::new(elevations.width(), elevations.height());
    let mut queue = VecDeque::from([start]);
    came_from.set(start, Some(start))?;

    while let Some(current) = queue.pop_front() {
        let elevation = elevations.get(current)?;
        if is_goal(current, elevation) {
            return walk_back(&came_from, start, current).map(Some);
        }

        for next in elevations.cartesian_neighbor_points(current)? {
            if came_from.get_ref(next)?.is_none() && can_step(elevation, elevations.get(next)?) {
                came_from.set(next, Some(current))?;
                queue.push_back(next);
            }
        }
    }
    Ok(None)
}

fn walk_back(came_from: &Grid<Option<Point>>, start: Point, goal: Point) -> Result<Vec<Point>, GridError> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        match came_from.get(current)? {
            Some(previous) => {
                path.push(previous);
                current = previous;
            }
            None => break,
        }
    }
    path.reverse();
    Ok(path)
}

fn log_path(elevations: &Grid<u8>, path: &[Point]) {
    if tracing::enabled!(tracing::Level::DEBUG) {
        let letters = elevations.map(|_, &elevation| (b'a' + elevation) as char);
        tracing::debug!(steps = path.len() - 1, "route:\n{}", letters.render_highlighted(path));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use advent_solver::SolverExt;

    const EXAMPLE: &str = "\
Sabqponm
abcryxxl
accszExk
acctuvwj
abdefghi
";

    #[test]
    fn test_fewest_steps_from_start() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(shared.start, Point::new(0, 0));
        assert_eq!(shared.end, Point::new(2, 5));
        assert_eq!(Solver::solve_part_checked_range(&mut shared, 1).unwrap(), "31");
    }

    #[test]
    fn test_fewest_steps_from_any_lowest_square() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part_checked_range(&mut shared, 2).unwrap(), "29");
    }

    #[test]
    fn test_path_is_contiguous() {
        let shared = Solver::parse(EXAMPLE).unwrap();
        let end = shared.end;
        let path = shortest_path(&shared.elevations, shared.start, |f, t| t <= f + 1, |p, _| p == end)
            .unwrap()
            .unwrap();

        assert_eq!(path.first(), Some(&shared.start));
        assert_eq!(path.last(), Some(&end));
        assert!(path.windows(2).all(|step| step[0].manhattan_distance(step[1]) == 1));
    }

    #[test]
    fn test_unreachable_end_fails() {
        let mut shared = Solver::parse("SzE\n").unwrap();
        assert!(matches!(
            Solver::solve_part_checked_range(&mut shared, 1),
            Err(SolveError::SolveFailed(_))
        ));
    }

    #[test]
    fn test_missing_markers() {
        assert!(matches!(Solver::parse("abc\nabE\n"), Err(ParseError::MissingData(_))));
        assert!(matches!(Solver::parse("Sbc\nabc\n"), Err(ParseError::MissingData(_))));
        assert!(matches!(Solver::parse("Sb1\nabE\n"), Err(ParseError::InvalidFormat(_))));
    }
}

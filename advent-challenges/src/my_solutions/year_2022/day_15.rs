use std::collections::HashSet;
use std::ops::RangeInclusive;
use std::sync::LazyLock;

use advent_solver::{AocParser, ParseError, PartSolver, SolveError};
use advent_solver_macros::{AocSolver, AutoRegisterSolver};
use anyhow::anyhow;
use rayon::prelude::*;
use regex::Regex;

use crate::utils::grid::Point;
use crate::utils::parse_lines;

/// Row inspected by part 1.
const INSPECTED_ROW: isize = 2_000_000;
/// Upper bound of both coordinates of the distress beacon.
const SEARCH_LIMIT: isize = 4_000_000;
const TUNING_MULTIPLIER: isize = 4_000_000;

static SENSOR_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Sensor at x=(-?\d+), y=(-?\d+): closest beacon is at x=(-?\d+), y=(-?\d+)$")
        .unwrap()
});

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 15, name = "Beacon Exclusion Zone", tags = ["parallel"])]
pub struct Solver;

/// A sensor and the closest beacon it reports.
///
/// Points here use `x` for the horizontal coordinate and `y` for the row, as
/// the puzzle input does. Coordinates are read as `i32`, which keeps radii and
/// covered ranges well inside `isize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sensor {
    position: Point,
    beacon: Point,
    radius: usize,
}

impl Sensor {
    fn new(position: Point, beacon: Point) -> Self {
        Self {
            position,
            beacon,
            radius: position.manhattan_distance(beacon),
        }
    }

    /// Positions of `row` within this sensor's radius.
    fn coverage(&self, row: isize) -> Option<RangeInclusive<isize>> {
        let reach = isize::try_from(self.radius.checked_sub(self.position.y.abs_diff(row))?).ok()?;
        Some(self.position.x - reach..=self.position.x + reach)
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Sensor>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let sensors = parse_lines(input, |line| {
            let captures = SENSOR_LINE
                .captures(line)
                .ok_or_else(|| anyhow!("expected 'Sensor at x=.., y=..: closest beacon is at x=.., y=..'"))?;
            let coordinate = |idx: usize| -> anyhow::Result<isize> {
                let value: i32 = captures[idx]
                    .parse()
                    .map_err(|e| anyhow!("coordinate '{}': {}", &captures[idx], e))?;
                Ok(isize::try_from(value)?)
            };
            Ok(Sensor::new(
                Point::new(coordinate(1)?, coordinate(2)?),
                Point::new(coordinate(3)?, coordinate(4)?),
            ))
        })?;

        if sensors.is_empty() {
            return Err(ParseError::MissingData("no sensors".into()));
        }
        Ok(sensors)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(excluded_in_row(shared, INSPECTED_ROW).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let beacon = find_distress_beacon(shared, SEARCH_LIMIT)
            .ok_or_else(|| SolveError::failed("every position in the search area is covered"))?;
        Ok(tuning_frequency(beacon).to_string())
    }
}

/// Sorted, non-overlapping ranges of `row` covered by at least one sensor.
fn merged_coverage(sensors: &[Sensor], row: isize) -> Vec<RangeInclusive<isize>> {
    let mut ranges: Vec<_> = sensors.iter().filter_map(|s| s.coverage(row)).collect();
    ranges.sort_unstable_by_key(|range| *range.start());

    let mut merged: Vec<RangeInclusive<isize>> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match merged.last_mut() {
            Some(last) if *range.start() <= *last.end() + 1 => {
                if range.end() > last.end() {
                    *last = *last.start()..=*range.end();
                }
            }
            _ => merged.push(range),
        }
    }
    merged
}

/// Number of positions in `row` where no undetected beacon can be.
fn excluded_in_row(sensors: &[Sensor], row: isize) -> usize {
    let merged = merged_coverage(sensors, row);
    let covered: usize = merged
        .iter()
        .map(|range| range.start().abs_diff(*range.end()) + 1)
        .sum();
    let known_beacons = sensors
        .iter()
        .map(|s| s.beacon)
        .filter(|beacon| beacon.y == row && merged.iter().any(|range| range.contains(&beacon.x)))
        .collect::<HashSet<_>>()
        .len();
    covered - known_beacons
}

/// First uncovered position in `row` within `0..=limit`.
fn gap_in_row(sensors: &[Sensor], row: isize, limit: isize) -> Option<isize> {
    let mut next = 0;
    for range in merged_coverage(sensors, row) {
        if next > limit {
            break;
        }
        if *range.start() > next {
            return Some(next);
        }
        next = next.max(*range.end() + 1);
    }
    (next <= limit).then_some(next)
}

/// The only position with both coordinates in `0..=limit` no sensor covers.
///
/// Rows are scanned in parallel; any uncovered position found ends the search.
fn find_distress_beacon(sensors: &[Sensor], limit: isize) -> Option<Point> {
    let beacon = (0..=limit)
        .into_par_iter()
        .find_map_any(|row| gap_in_row(sensors, row, limit).map(|x| Point::new(x, row)));
    if let Some(beacon) = beacon {
        tracing::debug!(%beacon, "found uncovered position");
    }
    beacon
}

fn tuning_frequency(beacon: Point) -> isize {
    beacon.x * TUNING_MULTIPLIER + beacon.y
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
Sensor at x=2, y=18: closest beacon is at x=-2, y=15
Sensor at x=9, y=16: closest beacon is at x=10, y=16
Sensor at x=13, y=2: closest beacon is at x=15, y=3
Sensor at x=12, y=14: closest beacon is at x=10, y=16
Sensor at x=10, y=20: closest beacon is at x=10, y=16
Sensor at x=14, y=17: closest beacon is at x=10, y=16
Sensor at x=8, y=7: closest beacon is at x=2, y=10
Sensor at x=2, y=0: closest beacon is at x=2, y=10
Sensor at x=0, y=11: closest beacon is at x=2, y=10
Sensor at x=20, y=14: closest beacon is at x=25, y=17
Sensor at x=17, y=20: closest beacon is at x=21, y=22
Sensor at x=16, y=7: closest beacon is at x=15, y=3
Sensor at x=14, y=3: closest beacon is at x=15, y=3
Sensor at x=20, y=1: closest beacon is at x=15, y=3
";

    #[test]
    fn test_excluded_positions_in_row() {
        let sensors = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(sensors.len(), 14);
        assert_eq!(excluded_in_row(&sensors, 10), 26);
    }

    #[test]
    fn test_distress_beacon() {
        let sensors = Solver::parse(EXAMPLE).unwrap();
        let beacon = find_distress_beacon(&sensors, 20).unwrap();

        assert_eq!(beacon, Point::new(14, 11));
        assert_eq!(tuning_frequency(beacon), 56_000_011);
    }

    #[test]
    fn test_coverage_shrinks_with_row_distance() {
        let sensor = Sensor::new(Point::new(8, 7), Point::new(2, 10));

        assert_eq!(sensor.radius, 9);
        assert_eq!(sensor.coverage(7), Some(-1..=17));
        assert_eq!(sensor.coverage(16), Some(8..=8));
        assert_eq!(sensor.coverage(17), None);
    }

    #[test]
    fn test_merged_coverage_joins_adjacent_ranges() {
        let sensors = [
            Sensor::new(Point::new(0, 0), Point::new(1, 0)),
            Sensor::new(Point::new(3, 0), Point::new(4, 0)),
            Sensor::new(Point::new(10, 0), Point::new(10, 1)),
        ];
        assert_eq!(merged_coverage(&sensors, 0), vec![-1..=4, 9..=11]);
        assert_eq!(gap_in_row(&sensors, 0, 20), Some(5));
        assert_eq!(gap_in_row(&sensors, 0, 4), None);
    }

    #[test]
    fn test_rejects_malformed_line() {
        let input = "Sensor at x=2, y=18: closest beacon is at x=-2, y=15\nSensor at x=2\n";
        assert!(matches!(
            Solver::parse(input),
            Err(ParseError::InvalidFormat(message)) if message.starts_with("(line 2)")
        ));
    }

    #[test]
    fn test_rejects_coordinates_outside_i32() {
        let input = "Sensor at x=2, y=18: closest beacon is at x=-2, y=15\n\
                     Sensor at x=-9223372036854775808, y=0: closest beacon is at x=9223372036854775807, y=1\n";
        assert!(matches!(
            Solver::parse(input),
            Err(ParseError::InvalidFormat(message)) if message.starts_with("(line 2)")
        ));
    }

    #[test]
    fn test_extreme_i32_coordinates_stay_in_range() {
        let input = "Sensor at x=-2147483648, y=0: closest beacon is at x=2147483647, y=2147483647\n";
        let sensors = Solver::parse(input).unwrap();
        let radius = 4_294_967_295 + 2_147_483_647;

        assert_eq!(sensors[0].radius, radius);
        assert_eq!(excluded_in_row(&sensors, 0), 2 * radius + 1);
    }
}

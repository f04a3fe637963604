use std::str::FromStr;

use advent_solver::{AocParser, ParseError, PartSolver, SolveError};
use advent_solver_macros::{AocSolver, AutoRegisterSolver};
use anyhow::{anyhow, bail};

use crate::utils::grid::{Grid, Point};
use crate::utils::parse_lines;

const DISPLAY_ROWS: usize = 6;
const DISPLAY_COLUMNS: usize = 40;
const LIT: char = '#';
const DARK: char = '.';

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 10, name = "Cathode-Ray Tube", tags = ["grid", "simulation"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Noop,
    AddX(i32),
}

impl FromStr for Instruction {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        match (words.next(), words.next(), words.next()) {
            (Some("noop"), None, None) => Ok(Instruction::Noop),
            (Some("addx"), Some(value), None) => Ok(Instruction::AddX(
                value
                    .parse()
                    .map_err(|e| anyhow!("invalid addx operand '{}': {}", value, e))?,
            )),
            _ => bail!("unknown instruction '{}'", line),
        }
    }
}

impl AocParser for Solver {
    /// Value of the X register during each cycle, starting at cycle 1.
    type SharedData<'a> = Vec<i32>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let program = parse_lines(input, Instruction::from_str)?;
        if program.is_empty() {
            return Err(ParseError::MissingData("program has no instructions".into()));
        }
        Ok(register_trace(&program))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(signal_strength(shared).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(draw(shared)?.to_string())
    }
}

fn register_trace(program: &[Instruction]) -> Vec<i32> {
    let mut x = 1;
    let mut trace = Vec::with_capacity(program.len() * 2);
    for instruction in program {
        match *instruction {
            Instruction::Noop => trace.push(x),
            Instruction::AddX(value) => {
                trace.extend([x, x]);
                x += value;
            }
        }
    }
    trace
}

/// Sum of `cycle * X` over cycles 20, 60, 100, 140, 180 and 220.
fn signal_strength(trace: &[i32]) -> i64 {
    (20..=220)
        .step_by(40)
        .filter_map(|cycle| trace.get(cycle - 1).map(|&x| cycle as i64 * x as i64))
        .sum()
}

/// The CRT draws one pixel per cycle, left to right and top to bottom. A
/// pixel is lit when the 3-wide sprite centred on X covers its column.
fn draw(trace: &[i32]) -> Result<Grid<char>, SolveError> {
    let mut screen = Grid::filled(DISPLAY_ROWS, DISPLAY_COLUMNS, DARK);
    for (cycle, &x) in trace.iter().take(DISPLAY_ROWS * DISPLAY_COLUMNS).enumerate() {
        let pixel = Point::new(
            (cycle / DISPLAY_COLUMNS) as isize,
            (cycle % DISPLAY_COLUMNS) as isize,
        );
        if (x as isize - pixel.y).abs() <= 1 {
            screen.set(pixel, LIT)?;
        }
    }
    tracing::debug!(cycles = trace.len(), "rendered display");
    Ok(screen)
}

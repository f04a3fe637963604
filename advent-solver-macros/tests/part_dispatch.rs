use advent_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, Solver};

#[derive(AocSolver)]
#[aoc_solver(max_parts = 2)]
struct TestSolver;

impl AocParser for TestSolver {
    type SharedData<'a> = Vec<i32>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        input
            .lines()
            .map(|line| {
                line.trim()
                    .parse::<i32>()
                    .map_err(|_| ParseError::InvalidFormat("Expected integer".into()))
            })
            .collect()
    }
}

impl PartSolver<1> for TestSolver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().sum::<i32>().to_string())
    }
}

impl PartSolver<2> for TestSolver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().product::<i32>().to_string())
    }
}

/// Parts can hand data to each other through the shared state
#[derive(AocSolver)]
#[aoc_solver(max_parts = 2)]
struct DependentSolver;

struct Shared {
    numbers: Vec<u64>,
    sorted: bool,
}

impl AocParser for DependentSolver {
    type SharedData<'a> = Shared;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let numbers = input
            .split_whitespace()
            .map(|n| n.parse().map_err(|_| ParseError::InvalidFormat(n.to_string())))
            .collect::<Result<_, _>>()?;
        Ok(Shared {
            numbers,
            sorted: false,
        })
    }
}

impl PartSolver<1> for DependentSolver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared.numbers.sort_unstable();
        shared.sorted = true;
        Ok(shared.numbers[0].to_string())
    }
}

impl PartSolver<2> for DependentSolver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        if !shared.sorted {
            return Err(SolveError::PartNotImplemented(2));
        }
        Ok(shared.numbers.last().copied().unwrap_or_default().to_string())
    }
}

#[test]
fn test_parts_constant_matches_attribute() {
    assert_eq!(<TestSolver as Solver>::PARTS, 2);
}

#[test]
fn test_solve_part_dispatches_to_part_solver() {
    let mut shared = TestSolver::parse("1\n2\n3\n4").unwrap();

    assert_eq!(TestSolver::solve_part(&mut shared, 1).unwrap(), "10");
    assert_eq!(TestSolver::solve_part(&mut shared, 2).unwrap(), "24");
}

#[test]
fn test_part_out_of_range() {
    let mut shared = TestSolver::parse("1\n2\n3").unwrap();

    assert!(matches!(
        TestSolver::solve_part(&mut shared, 3),
        Err(SolveError::PartOutOfRange(3))
    ));
    assert!(matches!(
        TestSolver::solve_part(&mut shared, 0),
        Err(SolveError::PartOutOfRange(0))
    ));
}

#[test]
fn test_second_part_sees_first_part_state() {
    let mut shared = DependentSolver::parse("5 3 9 1").unwrap();

    assert_eq!(DependentSolver::solve_part(&mut shared, 1).unwrap(), "1");
    assert_eq!(DependentSolver::solve_part(&mut shared, 2).unwrap(), "9");
}

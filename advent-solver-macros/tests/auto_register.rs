use advent_solver::{
    AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError,
    SolverRegistryBuilder,
};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2016, day = 3, name = "Squares With Three Sides", tags = ["test", "geometry"])]
struct Triangles;

impl AocParser for Triangles {
    type SharedData<'a> = Vec<[u32; 3]>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        input
            .lines()
            .map(|line| -> Result<[u32; 3], ParseError> {
                let sides: Vec<u32> = line
                    .split_whitespace()
                    .map(|s| s.parse().map_err(|_| ParseError::InvalidFormat(s.into())))
                    .collect::<Result<_, _>>()?;
                sides
                    .try_into()
                    .map_err(|_| ParseError::MissingData(format!("expected 3 sides in {line:?}")))
            })
            .collect()
    }
}

impl PartSolver<1> for Triangles {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let valid = shared
            .iter()
            .filter(|[a, b, c]| a + b > *c && a + c > *b && b + c > *a)
            .count();
        Ok(valid.to_string())
    }
}

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2016, day = 4)]
struct Unnamed;

impl AocParser for Unnamed {
    type SharedData<'a> = &'a str;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Ok(input)
    }
}

impl PartSolver<1> for Unnamed {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.len().to_string())
    }
}

#[test]
fn test_plugin_registered_with_metadata() {
    let registry = SolverRegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.tags.contains(&"test"))
        .unwrap()
        .build();

    let info = registry.storage().get_info(2016, 3).expect("plugin registered");
    assert_eq!(info.name, "Squares With Three Sides");
    assert_eq!(info.parts, 1);
    assert!(!registry.storage().contains(2016, 4));
}

#[test]
fn test_name_defaults_to_type_name() {
    let registry = SolverRegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.year == 2016 && plugin.day == 4)
        .unwrap()
        .build();

    assert_eq!(registry.storage().get_info(2016, 4).unwrap().name, "Unnamed");
}

#[test]
fn test_registered_plugin_solves() {
    let registry = SolverRegistryBuilder::new()
        .register_all_plugins()
        .unwrap()
        .build();

    let mut solver = registry
        .create_solver(2016, 3, "5 10 25\n3 4 5\n")
        .expect("Failed to create solver");
    assert_eq!(solver.name(), "Squares With Three Sides");
    assert_eq!(solver.solve(1).unwrap().answer, "1");

    let mut borrowed = registry.create_solver(2016, 4, "abc").unwrap();
    assert_eq!(borrowed.solve(1).unwrap().answer, "3");
}

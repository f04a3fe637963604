//! CLI argument parsing using clap

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Parallelization level for solver execution
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum ParallelizeBy {
    /// No parallelization; execute all challenges sequentially in order
    Sequential,
    /// Parallelize across years; days and parts run sequentially within each year
    Year,
    /// Parallelize across year/day combinations; parts run sequentially (default)
    #[default]
    Day,
    /// Parallelize across all year/day/part combinations
    Part,
}

/// Advent of Code challenge runner
#[derive(Parser, Debug)]
#[command(
    name = "aoc",
    about = "Run Advent of Code challenges",
    version,
    after_help = "Selections: \"today\" (t), \"latest\" (l), \"2023 03\", \"03\". \
                  Without one, the runner asks on a terminal and uses latest otherwise."
)]
pub struct Args {
    /// Challenge to run: today, latest, <year> <day> or <day>
    #[arg(value_name = "SELECTION", num_args = 0..=2, conflicts_with = "all")]
    pub selection: Vec<String>,

    /// Run every registered challenge instead of a single selection
    #[arg(short, long)]
    pub all: bool,

    /// Restrict --all to one year
    #[arg(short, long, requires = "all")]
    pub year: Option<u16>,

    /// Part to run (runs all parts if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=25))]
    pub part: Option<u8>,

    /// Tags to filter challenges (comma-separated, all must match)
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Directory holding <year>/dayDD.txt input files
    #[arg(long, default_value = "Inputs")]
    pub input_dir: PathBuf,

    /// Number of threads for parallel execution
    #[arg(long)]
    pub threads: Option<usize>,

    /// Parallelization level: sequential, year, day, or part
    #[arg(long, value_enum, default_value = "day")]
    pub parallelize_by: ParallelizeBy,

    /// Quiet mode - only output answers
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["aoc"]).unwrap();

        assert!(args.selection.is_empty());
        assert!(!args.all);
        assert_eq!(args.input_dir, PathBuf::from("Inputs"));
        assert_eq!(args.parallelize_by, ParallelizeBy::Day);
    }

    #[test]
    fn test_selection_words() {
        let args = Args::try_parse_from(["aoc", "2023", "03", "--part", "2"]).unwrap();
        assert_eq!(args.selection, vec!["2023", "03"]);
        assert_eq!(args.part, Some(2));

        assert!(Args::try_parse_from(["aoc", "2023", "03", "x"]).is_err());
    }

    #[test]
    fn test_all_conflicts_with_selection() {
        assert!(Args::try_parse_from(["aoc", "--all", "latest"]).is_err());
        assert!(Args::try_parse_from(["aoc", "--year", "2022"]).is_err());

        let args = Args::try_parse_from(["aoc", "--all", "--year", "2022", "-t", "grid,bfs"]).unwrap();
        assert_eq!(args.year, Some(2022));
        assert_eq!(args.tags, vec!["grid", "bfs"]);
    }
}

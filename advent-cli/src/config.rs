//! Configuration resolution from CLI args

use crate::cli::{Args, ParallelizeBy};
use crate::error::CliError;
use crate::selection::Selection;
use std::io::{BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};

/// What the user asked to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Every registered challenge, optionally limited to one year
    All { year: Option<u16> },
    /// One challenge, still to be resolved against the registry
    Single(Selection),
}

/// Resolved runtime configuration
#[derive(Debug)]
pub struct Config {
    pub target: Target,
    /// Part filter (None = all parts)
    pub part_filter: Option<u8>,
    /// Tags to filter challenges
    pub tags: Vec<String>,
    /// Root of the `<year>/dayDD.txt` input tree
    pub input_dir: PathBuf,
    /// Number of threads for parallel execution
    pub thread_count: usize,
    /// Parallelization level
    pub parallelize_by: ParallelizeBy,
    /// Quiet mode
    pub quiet: bool,
}

impl Config {
    /// Build config from CLI args, asking for a selection if none was given
    pub fn from_args(args: Args) -> Result<Self, CliError> {
        let thread_count = match args.threads {
            Some(0) => return Err(CliError::Config("--threads must be at least 1".to_string())),
            Some(n) => n,
            None => num_cpus(),
        };

        let target = if args.all {
            Target::All { year: args.year }
        } else if args.selection.is_empty() {
            Target::Single(select_interactively()?)
        } else {
            Target::Single(Selection::parse_or_latest(&args.selection.join(" ")))
        };

        Ok(Config {
            target,
            part_filter: args.part,
            tags: args.tags,
            input_dir: expand_tilde(&args.input_dir),
            thread_count,
            parallelize_by: args.parallelize_by,
            quiet: args.quiet,
        })
    }
}

/// Expand ~ to home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str()
        && (path_str.starts_with("~/") || path_str == "~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path_str.trim_start_matches('~').trim_start_matches('/'));
    }
    path.to_path_buf()
}

/// Get number of CPUs
fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Ask on stdin when it is a terminal; otherwise run the latest challenge
fn select_interactively() -> Result<Selection, CliError> {
    let stdin = std::io::stdin();
    if !stdin.is_terminal() {
        tracing::info!("No selection given. Defaulting to \"latest\" challenge.");
        return Ok(Selection::Latest);
    }
    prompt_selection(&mut stdin.lock())
}

fn prompt_selection(reader: &mut impl BufRead) -> Result<Selection, CliError> {
    tracing::info!("Valid inputs: \"[t]oday\", \"[l]atest\", \"2023 03\", \"03\"");
    tracing::info!("Default (no input): latest");
    print!("> ");
    std::io::stdout().flush().ok();

    let mut input = String::new();
    reader.read_line(&mut input)?;
    Ok(Selection::parse_or_latest(&input))
}

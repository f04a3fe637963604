//! Error types for the CLI

use std::path::PathBuf;
use thiserror::Error;
use thiserror_ext::Arc as ArcDerive;

/// Main CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Nothing was registered (or everything was filtered out by tags)
    #[error("No available challenges")]
    NoChallenges,

    /// The selection resolved to a challenge that is not registered
    #[error("No challenge could be found with the criteria \"{0}\"")]
    NotFound(String),

    /// Filters left nothing to run
    #[error("No challenges matched the specified filters")]
    NothingSelected,

    /// Registration error
    #[error("Registration error: {0}")]
    Registration(#[from] advent_solver::RegistrationError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Some parts finished with an error; each was reported as it arrived
    #[error("{failed} of {total} part(s) failed")]
    Failed { failed: usize, total: usize },

    /// Executor error (wraps Arc for cheap cloning)
    #[error("{0}")]
    Executor(#[from] ArcExecutorError),
}

/// Executor-specific errors
#[derive(Error, Debug, ArcDerive)]
#[thiserror_ext(newtype(name = ArcExecutorError))]
pub enum ExecutorError {
    /// Input file could not be loaded
    #[error("Input unavailable for {year}/{day:02}: {source}")]
    Input {
        year: u16,
        day: u8,
        #[source]
        source: InputError,
    },

    /// Loading or solving failed
    #[error("{0}")]
    Solver(#[from] advent_solver::SolverError),

    /// Channel send error
    #[error("Channel send error")]
    ChannelSend,

    /// Thread pool creation failed
    #[error("Thread pool creation failed: {0}")]
    ThreadPool(String),

    /// Multiple errors collected during parallel execution
    #[error("Multiple errors occurred ({} total)", .0.len())]
    Multiple(Vec<ArcExecutorError>),
}

impl ArcExecutorError {
    /// Merge two errors into one `Multiple`, flattening nested ones
    pub fn combine(first: ArcExecutorError, second: ArcExecutorError) -> ArcExecutorError {
        let flatten = |error: ArcExecutorError| {
            if let ExecutorError::Multiple(errors) = error.inner() {
                return errors.clone();
            }
            vec![error]
        };
        let mut errors = flatten(first);
        errors.extend(flatten(second));
        ExecutorError::Multiple(errors).into()
    }

    /// Combine an optional error with a new error
    pub fn combine_opt(
        existing: Option<ArcExecutorError>,
        new: ArcExecutorError,
    ) -> ArcExecutorError {
        match existing {
            Some(e) => Self::combine(e, new),
            None => new,
        }
    }
}

/// Input file errors
#[derive(Error, Debug)]
pub enum InputError {
    /// No file at the expected path
    #[error("{} does not exist", .0.display())]
    Missing(PathBuf),

    /// The file exists but could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel_error() -> ArcExecutorError {
        ExecutorError::ChannelSend.into()
    }

    fn count(error: &ArcExecutorError) -> usize {
        match error.inner() {
            ExecutorError::Multiple(errors) => errors.len(),
            _ => 1,
        }
    }

    #[test]
    fn test_combine_flattens() {
        let pair = ArcExecutorError::combine(channel_error(), channel_error());
        assert_eq!(count(&pair), 2);

        let triple = ArcExecutorError::combine(pair.clone(), channel_error());
        assert_eq!(count(&triple), 3);

        let four = ArcExecutorError::combine(pair.clone(), pair);
        assert_eq!(count(&four), 4);
        assert_eq!(four.to_string(), "Multiple errors occurred (4 total)");
    }

    #[test]
    fn test_combine_opt() {
        assert_eq!(count(&ArcExecutorError::combine_opt(None, channel_error())), 1);
        assert_eq!(
            count(&ArcExecutorError::combine_opt(Some(channel_error()), channel_error())),
            2
        );
    }

    #[test]
    fn test_shared_error_message() {
        let error: ArcExecutorError = ExecutorError::Input {
            year: 2022,
            day: 8,
            source: InputError::Missing(PathBuf::from("Inputs/2022/day08.txt")),
        }
        .into();
        let shared = error.clone();

        assert_eq!(
            shared.to_string(),
            "Input unavailable for 2022/08: Inputs/2022/day08.txt does not exist"
        );
    }
}

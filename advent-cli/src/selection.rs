//! Which challenge to run when a single one is requested

use advent_solver::SolverFactoryStorage;
use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A user's choice of challenge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Today's day of the month in the current year
    Today,
    /// The newest registered challenge
    Latest,
    YearDay { year: u16, day: u8 },
    /// A day of the current year
    Day(u8),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid selection \"{0}\"")]
pub struct InvalidSelection(String);

impl FromStr for Selection {
    type Err = InvalidSelection;

    /// Case-insensitive. Blank input selects [`Selection::Latest`].
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let lower = input.trim().to_lowercase();
        let words: Vec<&str> = lower.split_whitespace().collect();
        let invalid = || InvalidSelection(input.trim().to_string());

        match words.as_slice() {
            [] | ["l"] | ["latest"] => Ok(Selection::Latest),
            ["t"] | ["today"] => Ok(Selection::Today),
            [year, day] => match (year.parse(), day.parse()) {
                (Ok(year), Ok(day)) => Ok(Selection::YearDay { year, day }),
                _ => Err(invalid()),
            },
            [day] => day.parse().map(Selection::Day).map_err(|_| invalid()),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Today => write!(f, "today"),
            Selection::Latest => write!(f, "latest"),
            Selection::YearDay { year, day } => write!(f, "{} {:02}", year, day),
            Selection::Day(day) => write!(f, "{:02}", day),
        }
    }
}

impl Selection {
    /// Parse `input`, falling back to [`Selection::Latest`] with a warning.
    pub fn parse_or_latest(input: &str) -> Self {
        input.parse().unwrap_or_else(|e: InvalidSelection| {
            tracing::warn!("{}. Defaulting to \"latest\" challenge.", e);
            Selection::Latest
        })
    }

    /// The `(year, day)` this selection points at, given the current date.
    ///
    /// `None` only for [`Selection::Latest`] on an empty registry. The key is
    /// not checked against the registry otherwise.
    pub fn key(self, storage: &SolverFactoryStorage, today: NaiveDate) -> Option<(u16, u8)> {
        let this_year = u16::try_from(today.year()).ok();
        match self {
            Selection::Today => Some((this_year?, today.day() as u8)),
            Selection::Latest => storage.latest().map(|info| (info.year, info.day)),
            Selection::YearDay { year, day } => Some((year, day)),
            Selection::Day(day) => Some((this_year?, day)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use advent_solver::{AocParser, ParseError, SolveError, Solver, SolverRegistryBuilder};

    struct Stub;

    impl AocParser for Stub {
        type SharedData<'a> = ();

        fn parse(_input: &str) -> Result<Self::SharedData<'_>, ParseError> {
            Ok(())
        }
    }

    impl Solver for Stub {
        const PARTS: u8 = 1;

        fn solve_part(_shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
            Err(SolveError::PartNotImplemented(part))
        }
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_parse_keywords() {
        for input in ["", "  ", "l", "latest", "LATEST", " Latest "] {
            assert_eq!(input.parse(), Ok(Selection::Latest), "{input:?}");
        }
        for input in ["t", "today", "Today"] {
            assert_eq!(input.parse(), Ok(Selection::Today), "{input:?}");
        }
    }

    #[test]
    fn test_parse_numbers() {
        assert_eq!("2023 03".parse(), Ok(Selection::YearDay { year: 2023, day: 3 }));
        assert_eq!("  2022   15 ".parse(), Ok(Selection::YearDay { year: 2022, day: 15 }));
        assert_eq!("03".parse(), Ok(Selection::Day(3)));
    }

    #[test]
    fn test_parse_invalid() {
        for input in ["tomorrow", "2023 x", "2023 3 1", "-1", "300"] {
            assert!(input.parse::<Selection>().is_err(), "{input:?}");
        }
        assert_eq!(Selection::parse_or_latest("tomorrow"), Selection::Latest);
        assert_eq!(Selection::parse_or_latest("8"), Selection::Day(8));
    }

    #[test]
    fn test_display_round_trips() {
        for selection in [
            Selection::Today,
            Selection::Latest,
            Selection::YearDay { year: 2022, day: 8 },
            Selection::Day(12),
        ] {
            assert_eq!(selection.to_string().parse(), Ok(selection));
        }
    }

    #[test]
    fn test_key_resolution() {
        let registry = SolverRegistryBuilder::new()
            .register_solver::<Stub>(2022, 15, "Stub")
            .unwrap()
            .register_solver::<Stub>(2023, 3, "Stub")
            .unwrap()
            .build();
        let storage = registry.storage();
        let today = date(2024, 12, 5);

        assert_eq!(Selection::Latest.key(storage, today), Some((2023, 3)));
        assert_eq!(Selection::Today.key(storage, today), Some((2024, 5)));
        assert_eq!(Selection::Day(7).key(storage, today), Some((2024, 7)));
        assert_eq!(
            Selection::YearDay { year: 2022, day: 15 }.key(storage, today),
            Some((2022, 15))
        );

        let empty = SolverRegistryBuilder::new().build();
        assert_eq!(Selection::Latest.key(empty.storage(), today), None);
    }
}

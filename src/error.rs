// File: ./src/error.rs
//! Error types for rule parsing, date resolution and event loading.

use std::path::PathBuf;
use thiserror::Error;

/// Failures of the pure date helpers in [`crate::dates`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    #[error("invalid 'nth' value: {0}, must be between 1 and 5")]
    InvalidNth(u32),

    #[error("invalid month: {0}, must be between 1 and 12")]
    InvalidMonth(u32),

    #[error("invalid week number: {0}")]
    InvalidWeek(u32),

    #[error("could not find a day in week {week} of year {year} (overshot)")]
    WeekOvershot { year: i32, week: u32 },

    #[error("could not find a day in week {week} of year {year} after 370 attempts")]
    WeekNotFound { year: i32, week: u32 },

    #[error("could not determine first day of ISO week {week} for year {year}")]
    WeekCheckFailed { year: i32, week: u32 },

    #[error("date out of range")]
    OutOfRange,
}

/// Failures turning a rule string into a concrete date.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    #[error("{0}")]
    Parse(String),

    #[error(transparent)]
    Resolve(#[from] DateError),
}

impl RuleError {
    pub(crate) fn parse(msg: impl Into<String>) -> Self {
        RuleError::Parse(msg.into())
    }
}

/// A single events-file line that could not be turned into an event.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LineError {
    #[error("malformed event (missing ';'): {0}")]
    Malformed(String),

    #[error("line is not valid UTF-8: {0}")]
    InvalidUtf8(String),

    #[error("skipping event due to date parse error ('{rule}'): {source}")]
    Rule {
        rule: String,
        #[source]
        source: RuleError,
    },
}

/// Hard failures of a whole load. A missing file is not one of them.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("reading events file '{}': {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type RuleResult<T> = Result<T, RuleError>;

//! Error types for the buff_core library.

use chrono::NaiveDate;
use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for buff_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input parsing error (clock times, weight sets)
    #[error("Parse error: {0}")]
    Parse(String),

    /// No goal version covers the given date
    #[error("no goal version in effect on {date}; the earliest goal starts later")]
    NoApplicableGoal { date: NaiveDate },

    /// Two records (or two goal versions) share a date
    #[error("duplicate entry for date {date}")]
    DuplicateDate { date: NaiveDate },

    /// A record appeared before an earlier date in a date-ordered input
    #[error("record for {date} is out of order; expected a date after {latest}")]
    RecordOutOfOrder { date: NaiveDate, latest: NaiveDate },

    /// A goal version was appended out of order
    #[error("goal effective {date} must be strictly after the latest version ({latest})")]
    GoalOutOfOrder { date: NaiveDate, latest: NaiveDate },

    /// Aggregation requested with zero goal versions
    #[error("goal catalog is empty; record a goal version before aggregating")]
    EmptyCatalog,
}

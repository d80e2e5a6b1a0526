//! Error types for the goal advisor

use thiserror::Error;

/// Rejected goal input. Raised while parsing or validating goals, never by the
/// planning functions themselves.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidGoalError {
    #[error("Goal name cannot be empty")]
    EmptyName,

    #[error("Goal name '{0}' is too long (max 100 characters)")]
    NameTooLong(String),

    #[error("Goal '{name}' already exists")]
    DuplicateName { name: String },

    #[error("Invalid {field} '{value}'. Please provide a valid decimal number.")]
    MalformedAmount { field: &'static str, value: String },

    #[error("{field} for goal '{name}' cannot be negative")]
    NegativeAmount { name: String, field: &'static str },

    #[error("Invalid deadline '{0}'. Please use YYYY-MM-DD.")]
    MalformedDeadline(String),

    #[error("Invalid number of columns: expected 5, got {0}")]
    WrongColumnCount(usize),

    #[error("Invalid priority '{0}'. Priority must be a whole number between 1 and 5")]
    PriorityOutOfRange(String),
}

#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error(transparent)]
    InvalidGoal(#[from] InvalidGoalError),

    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Line {line}: {source}")]
    Import {
        line: usize,
        #[source]
        source: Box<AdvisorError>,
    },
}

pub type Result<T> = std::result::Result<T, AdvisorError>;

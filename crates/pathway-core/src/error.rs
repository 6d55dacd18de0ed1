use thiserror::Error;

/// Core error types for Pathway operations
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Unknown coding system: {0}")]
    UnknownCodingSystem(String),

    #[error("Invalid timeframe: start {start} is after end {end}")]
    InvalidTimeframe { start: String, end: String },

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Time parsing error: {0}")]
    TimeParse(#[from] time::error::Parse),
}

impl CoreError {
    /// Create a new UnknownCodingSystem error
    pub fn unknown_coding_system(system: impl Into<String>) -> Self {
        Self::UnknownCodingSystem(system.into())
    }

    /// Create a new InvalidTimeframe error
    pub fn invalid_timeframe(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self::InvalidTimeframe {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Create a new InvalidDate error
    pub fn invalid_date(date: impl Into<String>) -> Self {
        Self::InvalidDate(date.into())
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;

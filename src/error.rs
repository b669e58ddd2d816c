//! Error types for purchasing-power

use crate::types::YearMonth;
use thiserror::Error;

/// Main error type for purchasing-power
///
/// Every variant is recoverable by the user: callers show the message in place
/// of the normal result and keep going.
#[derive(Error, Debug)]
pub enum PowerError {
    #[error("Invalid amount {amount}: {reason}")]
    InvalidAmount { amount: f64, reason: &'static str },

    #[error("Invalid range: start {start} is after end {end}")]
    InvalidRange { start: YearMonth, end: YearMonth },

    #[error("Missing rate for {0}")]
    MissingRate(YearMonth),

    #[error("Failed to load {indicator} data: {reason}")]
    DataLoadFailure { indicator: String, reason: String },

    #[error("Indicator unavailable: {indicator} ({reason})")]
    IndicatorUnavailable { indicator: String, reason: String },

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

impl PowerError {
    /// True for the errors caused by user input rather than by the dataset.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            PowerError::InvalidAmount { .. } | PowerError::InvalidRange { .. }
        )
    }
}

/// Result type alias for purchasing-power operations
pub type Result<T> = std::result::Result<T, PowerError>;

use thiserror::Error;
use zonewise_core::ValidationError;

/// Result type for solar operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during sun and shadow analysis
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("Date {0} cannot be represented as a UTC timestamp")]
    InvalidDate(chrono::NaiveDate),

    #[error("Solar position calculation failed: {0}")]
    Ephemeris(String),

    #[error("Shadow analysis was cancelled")]
    Cancelled,
}

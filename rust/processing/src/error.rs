use thiserror::Error;

/// Result type for site analysis
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during site analysis
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Geometry(#[from] zonewise_geometry::Error),

    #[error(transparent)]
    Solar(#[from] zonewise_solar::Error),

    #[error("Report serialization failed: {0}")]
    Report(#[from] serde_json::Error),
}

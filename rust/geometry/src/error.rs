use std::fmt;

use thiserror::Error;
use zonewise_core::ValidationError;

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Pipeline stage a geometry failure came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryStage {
    Validation,
    Inset,
    Triangulation,
}

impl fmt::Display for GeometryStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GeometryStage::Validation => "validation",
            GeometryStage::Inset => "inset",
            GeometryStage::Triangulation => "triangulation",
        };
        f.write_str(name)
    }
}

/// Errors that can occur during envelope generation
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("Geometry error during {stage}: {message}")]
    Geometry {
        stage: GeometryStage,
        message: String,
    },
}

impl Error {
    pub(crate) fn geometry(stage: GeometryStage, message: impl Into<String>) -> Self {
        Error::Geometry {
            stage,
            message: message.into(),
        }
    }

    /// Stage name for geometry failures, `None` for validation failures
    pub fn stage(&self) -> Option<GeometryStage> {
        match self {
            Error::Geometry { stage, .. } => Some(*stage),
            Error::Validation(_) => None,
        }
    }
}

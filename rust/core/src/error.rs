// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Input validation errors shared by every ZoneWise crate.

use thiserror::Error;

/// Result type for validation-checked operations
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Malformed or out-of-range input, reported before any computation starts
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Polygon ring needs at least 4 points (triangle + closing point), got {0}")]
    TooFewPoints(usize),

    #[error("Polygon ring is not closed: first and last points differ")]
    UnclosedRing,

    #[error("Non-finite coordinate at ring index {0}")]
    NonFiniteCoordinate(usize),

    #[error("Latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("Longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),

    #[error("Maximum height must be positive, got {0}")]
    NonPositiveHeight(f64),

    #[error("Maximum FAR must be positive, got {0}")]
    NonPositiveFar(f64),

    #[error("Setback '{side}' must be non-negative, got {value}")]
    NegativeSetback { side: &'static str, value: f64 },

    #[error("Lot minimum '{field}' must be non-negative, got {value}")]
    NegativeLotMinimum { field: &'static str, value: f64 },

    #[error("Grid size must be positive, got {0}")]
    NonPositiveGridSize(f64),

    #[error("Grid resolution must be positive, got {0}")]
    NonPositiveResolution(f64),

    #[error("Grid of {cells} cells per side exceeds the limit of {max}")]
    GridTooLarge { cells: f64, max: usize },

    #[error("Time step must be at least one minute")]
    ZeroTimeStep,
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Zoning dimensional limits
//!
//! Limits are externally supplied data and immutable per query. Provenance
//! is carried through untouched.

use crate::error::{Result, ValidationError};

/// Front/side/rear setbacks in feet
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Setbacks {
    pub front: f64,
    pub side: f64,
    pub rear: f64,
}

impl Setbacks {
    pub fn new(front: f64, side: f64, rear: f64) -> Self {
        Self { front, side, rear }
    }

    /// Uniform inset distance: side counts twice since it applies to two edges
    #[inline]
    pub fn weighted_average_ft(&self) -> f64 {
        (self.front + self.side * 2.0 + self.rear) / 4.0
    }

    pub fn validate(&self) -> Result<()> {
        for (side, value) in [("front", self.front), ("side", self.side), ("rear", self.rear)] {
            if !(value >= 0.0) || !value.is_finite() {
                return Err(ValidationError::NegativeSetback { side, value });
            }
        }
        Ok(())
    }
}

/// Where a limits record came from
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct Provenance {
    pub source_url: Option<String>,
    pub verified_date: Option<String>,
    pub jurisdiction: Option<String>,
}

/// Dimensional limits for one zoning district
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ZoningLimits {
    pub district_code: String,
    pub district_name: String,
    pub min_lot_area_sq_ft: f64,
    pub min_lot_width_ft: f64,
    pub max_height_ft: f64,
    #[cfg_attr(feature = "serde", serde(alias = "maxFAR"))]
    pub max_far: f64,
    pub setbacks: Setbacks,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub provenance: Option<Provenance>,
}

impl ZoningLimits {
    /// Reject non-positive height/FAR and negative setbacks or minimums
    pub fn validate(&self) -> Result<()> {
        if !(self.max_height_ft > 0.0) || !self.max_height_ft.is_finite() {
            return Err(ValidationError::NonPositiveHeight(self.max_height_ft));
        }
        if !(self.max_far > 0.0) || !self.max_far.is_finite() {
            return Err(ValidationError::NonPositiveFar(self.max_far));
        }
        for (field, value) in [
            ("minLotAreaSqFt", self.min_lot_area_sq_ft),
            ("minLotWidthFt", self.min_lot_width_ft),
        ] {
            if !(value >= 0.0) {
                return Err(ValidationError::NegativeLotMinimum { field, value });
            }
        }
        self.setbacks.validate()
    }

    /// Compare a lot against the district minimums
    pub fn check_lot(&self, lot_area_sq_ft: f64, lot_width_ft: f64) -> ComplianceFlags {
        ComplianceFlags {
            meets_min_lot_area: lot_area_sq_ft >= self.min_lot_area_sq_ft,
            meets_min_lot_width: lot_width_ft >= self.min_lot_width_ft,
            lot_width_ft,
        }
    }
}

/// Lot-minimum compliance; informational only, never blocks geometry
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ComplianceFlags {
    pub meets_min_lot_area: bool,
    pub meets_min_lot_width: bool,
    pub lot_width_ft: f64,
}

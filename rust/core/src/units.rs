// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Unit conversions between the imperial reporting units and metric geometry
//!
//! Geometry is computed in meters; zoning inputs and reported metrics are in
//! feet and square feet. Conversions happen only at those two boundaries.

/// Exact international foot
pub const METERS_PER_FOOT: f64 = 0.3048;

/// Square feet in one square meter (reporting factor)
pub const SQ_FT_PER_SQ_M: f64 = 10.7639;

/// Mean Earth radius used for great-circle distances (meters)
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;

#[inline]
pub fn feet_to_meters(feet: f64) -> f64 {
    feet * METERS_PER_FOOT
}

#[inline]
pub fn meters_to_feet(meters: f64) -> f64 {
    meters / METERS_PER_FOOT
}

#[inline]
pub fn sq_meters_to_sq_feet(sq_meters: f64) -> f64 {
    sq_meters * SQ_FT_PER_SQ_M
}

#[inline]
pub fn sq_feet_to_sq_meters(sq_feet: f64) -> f64 {
    sq_feet / SQ_FT_PER_SQ_M
}

/// Length units accepted by [`crate::polygon::distance`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DistanceUnit {
    #[default]
    Meters,
    Kilometers,
    Feet,
    Miles,
}

impl DistanceUnit {
    /// Convert a length in meters into this unit
    #[inline]
    pub fn from_meters(self, meters: f64) -> f64 {
        match self {
            DistanceUnit::Meters => meters,
            DistanceUnit::Kilometers => meters / 1000.0,
            DistanceUnit::Feet => meters_to_feet(meters),
            DistanceUnit::Miles => meters / 1609.344,
        }
    }
}

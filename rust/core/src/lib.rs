// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # ZoneWise Core
//!
//! Data model and leaf utilities for buildable-envelope analysis.
//!
//! ## Overview
//!
//! - **Zoning limits**: [`ZoningLimits`] and [`Setbacks`] as supplied by the
//!   zoning data layer, with up-front validation.
//! - **Lot polygons**: [`LotPolygon`], a validated closed WGS84 ring.
//! - **Coordinate frames**: geographic, local tangent plane (meters) and
//!   render space (right-handed, Y-up, +Z south). See [`georef`].
//! - **Polygon utilities**: area, centroid, bounds, distance, bearing.
//!
//! All functions are pure. Angles are radians internally; lengths are
//! meters internally and feet at the reporting boundary.
//!
//! ## Quick Start
//!
//! ```rust
//! use zonewise_core::{GeoPoint, LotPolygon};
//!
//! let lot = LotPolygon::new(vec![
//!     GeoPoint::new(-80.6010, 28.1000),
//!     GeoPoint::new(-80.6000, 28.1000),
//!     GeoPoint::new(-80.6000, 28.1010),
//!     GeoPoint::new(-80.6010, 28.1010),
//!     GeoPoint::new(-80.6010, 28.1000),
//! ])
//! .unwrap();
//! assert!(lot.area_sq_m() > 0.0);
//! ```

pub mod error;
pub mod georef;
pub mod polygon;
pub mod units;
pub mod zoning;

pub use error::{Result, ValidationError};
pub use georef::{
    geo_to_local, geo_to_render, local_to_geo, render_to_geo, GeoPoint, LocalFrame,
    MAX_LOCAL_EXTENT_M,
};
pub use polygon::{area, bearing, bounding_box, centroid, distance, BoundingBox, LotPolygon};
pub use units::{
    feet_to_meters, meters_to_feet, sq_meters_to_sq_feet, DistanceUnit, METERS_PER_FOOT,
    SQ_FT_PER_SQ_M,
};
pub use zoning::{ComplianceFlags, Provenance, Setbacks, ZoningLimits};

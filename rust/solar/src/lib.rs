// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # ZoneWise Solar
//!
//! Sun position (NREL SPA), sun event times and a ray-cast ground shadow
//! sampler.
//!
//! Azimuths are north-based and clockwise in `[0, 2π)`. Directions and
//! occluders live in the same render space as envelope solids
//! (x = east, y = up, z = south).
//!
//! ```rust
//! use chrono::NaiveDate;
//! use zonewise_solar::daylight_hours;
//!
//! let date = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
//! let hours = daylight_hours(date, 40.0, -75.0).unwrap();
//! assert!(hours > 14.0 && hours < 16.0);
//! ```

pub mod error;
pub mod occluder;
pub mod position;
pub mod shadow;

pub use error::{Error, Result};
pub use occluder::{ray_intersects_triangle, Aabb, Occluder};
pub use position::{
    daylight_hours, local_midday, sun_position, sun_times, sun_times_on, SunPosition, SunTimes,
};
pub use shadow::{
    analyze_shadows, analyze_shadows_with_cancel, ShadowCell, ShadowConfig, ShadowGrid,
};

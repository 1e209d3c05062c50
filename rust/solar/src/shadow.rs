// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ground-plane shadow sampler
//!
//! A square grid of sample points is laid on the ground around the local
//! origin of `config.location`. For every daylight time sample the sun
//! direction is computed once, then each cell casts a ray toward the sun
//! against every occluder. Occluder solids must be in render space relative
//! to the same location (the envelope's `reference_center`).
//!
//! Cost is `cells × samples × triangles` with an AABB rejection per
//! occluder. Rows are evaluated in parallel with rayon.

use crate::error::{Error, Result};
use crate::occluder::Occluder;
use crate::position::{daylight_hours_from, sun_position, sun_times_on, SunPosition};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use nalgebra::{Point3, Vector3};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use zonewise_core::{GeoPoint, ValidationError};
use zonewise_geometry::Solid;

pub const DEFAULT_GRID_SIZE_M: f64 = 50.0;
pub const DEFAULT_RESOLUTION_M: f64 = 2.0;
pub const DEFAULT_TIME_STEP_MINUTES: u32 = 30;
pub const DEFAULT_GROUND_OFFSET_M: f64 = 0.1;

/// Largest grid accepted, in cells per side
pub const MAX_CELLS_PER_SIDE: usize = 2048;

/// Shadow analysis parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShadowConfig {
    pub date: NaiveDate,
    pub location: GeoPoint,
    #[serde(default = "default_grid_size")]
    pub grid_size_meters: f64,
    #[serde(default = "default_resolution")]
    pub resolution_meters: f64,
    #[serde(default = "default_time_step")]
    pub time_step_minutes: u32,
    #[serde(default = "default_ground_offset")]
    pub ground_offset_meters: f64,
}

fn default_grid_size() -> f64 {
    DEFAULT_GRID_SIZE_M
}

fn default_resolution() -> f64 {
    DEFAULT_RESOLUTION_M
}

fn default_time_step() -> u32 {
    DEFAULT_TIME_STEP_MINUTES
}

fn default_ground_offset() -> f64 {
    DEFAULT_GROUND_OFFSET_M
}

impl ShadowConfig {
    pub fn new(date: NaiveDate, location: GeoPoint) -> Self {
        Self {
            date,
            location,
            grid_size_meters: DEFAULT_GRID_SIZE_M,
            resolution_meters: DEFAULT_RESOLUTION_M,
            time_step_minutes: DEFAULT_TIME_STEP_MINUTES,
            ground_offset_meters: DEFAULT_GROUND_OFFSET_M,
        }
    }

    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        if !self.location.is_finite() {
            return Err(ValidationError::NonFiniteCoordinate(0));
        }
        if !(-90.0..=90.0).contains(&self.location.lat) {
            return Err(ValidationError::LatitudeOutOfRange(self.location.lat));
        }
        if !(-180.0..=180.0).contains(&self.location.lon) {
            return Err(ValidationError::LongitudeOutOfRange(self.location.lon));
        }
        if !(self.grid_size_meters > 0.0 && self.grid_size_meters.is_finite()) {
            return Err(ValidationError::NonPositiveGridSize(self.grid_size_meters));
        }
        if !(self.resolution_meters > 0.0 && self.resolution_meters.is_finite()) {
            return Err(ValidationError::NonPositiveResolution(self.resolution_meters));
        }
        let cells = (self.grid_size_meters / self.resolution_meters).ceil();
        if cells > MAX_CELLS_PER_SIDE as f64 {
            return Err(ValidationError::GridTooLarge {
                cells,
                max: MAX_CELLS_PER_SIDE,
            });
        }
        if self.time_step_minutes == 0 {
            return Err(ValidationError::ZeroTimeStep);
        }
        Ok(())
    }

    /// Cells per axis; at most [`MAX_CELLS_PER_SIDE`] once validated
    pub fn cells_per_side(&self) -> usize {
        (self.grid_size_meters / self.resolution_meters).ceil() as usize
    }
}

/// Exposure of one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShadowCell {
    pub sun_hours: f64,
    pub sun_percentage: f64,
}

/// Square grid of cell exposures, row-major
///
/// Row `r` runs along +z (north to south), column `c` along +x (west to east).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShadowGrid {
    pub size: usize,
    pub resolution_meters: f64,
    pub cells: Vec<ShadowCell>,
    pub daylight_hours: f64,
    /// Above-horizon samples each cell was tested at
    pub time_samples: usize,
}

impl ShadowGrid {
    pub fn get(&self, row: usize, col: usize) -> Option<&ShadowCell> {
        if row >= self.size || col >= self.size {
            return None;
        }
        self.cells.get(row * self.size + col)
    }

    /// Ground-level render-space center of a cell
    pub fn cell_center(&self, row: usize, col: usize) -> Point3<f64> {
        cell_center(self.size, self.resolution_meters, row, col, 0.0)
    }

    pub fn average_sun_hours(&self) -> f64 {
        if self.cells.is_empty() {
            return 0.0;
        }
        self.cells.iter().map(|c| c.sun_hours).sum::<f64>() / self.cells.len() as f64
    }

    pub fn min_sun_hours(&self) -> f64 {
        self.cells
            .iter()
            .map(|c| c.sun_hours)
            .reduce(f64::min)
            .unwrap_or(0.0)
    }

    pub fn max_sun_hours(&self) -> f64 {
        self.cells
            .iter()
            .map(|c| c.sun_hours)
            .reduce(f64::max)
            .unwrap_or(0.0)
    }
}

#[inline]
fn cell_center(size: usize, resolution: f64, row: usize, col: usize, height: f64) -> Point3<f64> {
    let half = size as f64 * resolution / 2.0;
    Point3::new(
        (col as f64 + 0.5) * resolution - half,
        height,
        (row as f64 + 0.5) * resolution - half,
    )
}

/// Sample instants for the day: sunrise to sunset, or nadir to nadir under
/// midnight sun, or nothing in polar night
fn time_samples(
    sunrise: Option<DateTime<Utc>>,
    sunset: Option<DateTime<Utc>>,
    nadir: DateTime<Utc>,
    daylight_hours: f64,
    step_minutes: u32,
) -> Vec<DateTime<Utc>> {
    let (start, end) = match (sunrise, sunset) {
        (Some(rise), Some(set)) => (rise, set),
        _ if daylight_hours > 0.0 => (nadir, nadir + Duration::hours(24)),
        _ => return Vec::new(),
    };

    let step = Duration::minutes(i64::from(step_minutes));
    let mut samples = Vec::new();
    let mut t = start;
    while t <= end {
        samples.push(t);
        t += step;
    }
    samples
}

/// Run the sampler over `occluders`
pub fn analyze_shadows(config: &ShadowConfig, occluders: &[Solid]) -> Result<ShadowGrid> {
    analyze_shadows_with_cancel(config, occluders, &AtomicBool::new(false))
}

/// Run the sampler, abandoning the grid as soon as `cancel` is set
///
/// A cancelled run returns [`Error::Cancelled`] and no partial grid.
pub fn analyze_shadows_with_cancel(
    config: &ShadowConfig,
    occluders: &[Solid],
    cancel: &AtomicBool,
) -> Result<ShadowGrid> {
    config.validate()?;

    let GeoPoint { lon, lat } = config.location;
    let times = sun_times_on(config.date, lat, lon)?;
    let daylight_hours = daylight_hours_from(&times, lat, lon)?;

    let positions = time_samples(
        times.sunrise,
        times.sunset,
        times.nadir,
        daylight_hours,
        config.time_step_minutes,
    )
    .into_iter()
    .map(|t| sun_position(t, lat, lon))
    .collect::<Result<Vec<SunPosition>>>()?;

    let directions: Vec<Vector3<f64>> = positions
        .iter()
        .filter(|p| p.is_day)
        .map(SunPosition::direction)
        .collect();

    let occluders: Vec<Occluder> = occluders
        .iter()
        .filter(|s| !s.is_empty())
        .map(Occluder::from_solid)
        .collect();

    let size = config.cells_per_side();
    let resolution = config.resolution_meters;
    let total = directions.len();

    tracing::debug!(
        size,
        samples = total,
        occluders = occluders.len(),
        triangles = occluders.iter().map(Occluder::triangle_count).sum::<usize>(),
        daylight_hours,
        "Shadow analysis"
    );

    let rows: Option<Vec<Vec<ShadowCell>>> = (0..size)
        .into_par_iter()
        .map(|row| {
            let mut cells = Vec::with_capacity(size);
            for col in 0..size {
                if cancel.load(Ordering::Relaxed) {
                    return None;
                }
                let origin = cell_center(size, resolution, row, col, config.ground_offset_meters);
                let lit = directions
                    .iter()
                    .filter(|dir| !occluders.iter().any(|o| o.blocks(&origin, dir)))
                    .count();
                cells.push(exposure(lit, total, daylight_hours));
            }
            Some(cells)
        })
        .collect();

    let rows = rows.ok_or(Error::Cancelled)?;

    Ok(ShadowGrid {
        size,
        resolution_meters: resolution,
        cells: rows.into_iter().flatten().collect(),
        daylight_hours,
        time_samples: total,
    })
}

#[inline]
fn exposure(lit: usize, total: usize, daylight_hours: f64) -> ShadowCell {
    if total == 0 {
        return ShadowCell::default();
    }
    let fraction = lit as f64 / total as f64;
    ShadowCell {
        sun_hours: fraction * daylight_hours,
        sun_percentage: fraction * 100.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use zonewise_geometry::{extrude_profile, Point2, Profile2D};

    fn config(date: NaiveDate) -> ShadowConfig {
        ShadowConfig {
            grid_size_meters: 20.0,
            resolution_meters: 4.0,
            time_step_minutes: 60,
            ..ShadowConfig::new(date, GeoPoint::new(-75.0, 40.0))
        }
    }

    fn june() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 21).unwrap()
    }

    #[test]
    fn test_cells_per_side_rounds_up() {
        let cfg = ShadowConfig {
            grid_size_meters: 10.0,
            resolution_meters: 3.0,
            ..ShadowConfig::new(june(), GeoPoint::new(0.0, 0.0))
        };
        assert_eq!(cfg.cells_per_side(), 4);
    }

    #[test]
    fn test_validation() {
        let mut cfg = config(june());
        cfg.resolution_meters = 0.0;
        assert!(matches!(
            analyze_shadows(&cfg, &[]),
            Err(Error::Validation(ValidationError::NonPositiveResolution(_)))
        ));

        let mut cfg = config(june());
        cfg.time_step_minutes = 0;
        assert!(matches!(
            analyze_shadows(&cfg, &[]),
            Err(Error::Validation(ValidationError::ZeroTimeStep))
        ));

        let mut cfg = config(june());
        cfg.grid_size_meters = -5.0;
        assert!(analyze_shadows(&cfg, &[]).is_err());
    }

    #[test]
    fn test_oversized_grid_is_rejected() {
        let mut cfg = config(june());
        cfg.grid_size_meters = 1.0e6;
        cfg.resolution_meters = 0.01;
        assert!(matches!(
            analyze_shadows(&cfg, &[]),
            Err(Error::Validation(ValidationError::GridTooLarge { max: MAX_CELLS_PER_SIDE, .. }))
        ));

        // Largest accepted grid still validates
        cfg.grid_size_meters = MAX_CELLS_PER_SIDE as f64;
        cfg.resolution_meters = 1.0;
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.cells_per_side(), MAX_CELLS_PER_SIDE);
    }

    #[test]
    fn test_open_ground_is_fully_lit() {
        let grid = analyze_shadows(&config(june()), &[]).unwrap();
        assert_eq!(grid.size, 5);
        assert_eq!(grid.cells.len(), 25);
        assert!(grid.time_samples > 0);
        for cell in &grid.cells {
            assert_relative_eq!(cell.sun_percentage, 100.0);
            assert_relative_eq!(cell.sun_hours, grid.daylight_hours);
        }
    }

    #[test]
    fn test_cell_centers_are_symmetric() {
        let grid = analyze_shadows(&config(june()), &[]).unwrap();
        let first = grid.cell_center(0, 0);
        let last = grid.cell_center(4, 4);
        assert_relative_eq!(first.x, -8.0);
        assert_relative_eq!(first.z, -8.0);
        assert_relative_eq!(last.x, 8.0);
        assert_relative_eq!(last.z, 8.0);
        assert!(grid.get(5, 0).is_none());
    }

    #[test]
    fn test_box_shades_cells_and_stays_in_bounds() {
        let profile = Profile2D::new(vec![
            Point2::new(-3.0, -3.0),
            Point2::new(3.0, -3.0),
            Point2::new(3.0, 3.0),
            Point2::new(-3.0, 3.0),
        ]);
        let tower = extrude_profile(&profile, 30.0).unwrap();
        let grid = analyze_shadows(&config(june()), &[tower]).unwrap();

        for cell in &grid.cells {
            assert!(cell.sun_hours >= 0.0);
            assert!(cell.sun_hours <= grid.daylight_hours + 1e-9);
        }
        // Center cell sits under the tower
        assert_relative_eq!(grid.get(2, 2).unwrap().sun_hours, 0.0);
        assert!(grid.min_sun_hours() < grid.max_sun_hours());
        assert!(grid.average_sun_hours() < grid.daylight_hours);
    }

    #[test]
    fn test_pre_cancelled_returns_nothing() {
        let cancel = AtomicBool::new(true);
        assert!(matches!(
            analyze_shadows_with_cancel(&config(june()), &[], &cancel),
            Err(Error::Cancelled)
        ));
    }

    #[test]
    fn test_polar_night_has_no_sun() {
        let cfg = ShadowConfig {
            grid_size_meters: 4.0,
            resolution_meters: 2.0,
            ..ShadowConfig::new(
                NaiveDate::from_ymd_opt(2024, 12, 21).unwrap(),
                GeoPoint::new(18.96, 69.65),
            )
        };
        let grid = analyze_shadows(&cfg, &[]).unwrap();
        assert_eq!(grid.daylight_hours, 0.0);
        assert_eq!(grid.time_samples, 0);
        assert!(grid.cells.iter().all(|c| c.sun_hours == 0.0));
    }

    #[test]
    fn test_midnight_sun_samples_whole_day() {
        let cfg = ShadowConfig {
            grid_size_meters: 2.0,
            resolution_meters: 2.0,
            ..ShadowConfig::new(june(), GeoPoint::new(18.96, 69.65))
        };
        let grid = analyze_shadows(&cfg, &[]).unwrap();
        assert_eq!(grid.daylight_hours, 24.0);
        assert_eq!(grid.time_samples, 49);
        assert_relative_eq!(grid.cells[0].sun_hours, 24.0);
    }
}

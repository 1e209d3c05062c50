// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Solar position and sun times
//!
//! Positions come from the NREL Solar Position Algorithm (SPA) in
//! `solar_positioning`, with standard atmospheric refraction. Event times
//! are found by bisection on the sun elevation either side of the solar
//! transit, so every event type uses the same solver.
//!
//! ## Azimuth convention
//!
//! Azimuths are **0 = North, clockwise, in [0, 2π)**.

use crate::error::{Error, Result};
use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use nalgebra::Vector3;
use serde::Serialize;
use solar_positioning::{
    spa,
    time::DeltaT,
    types::{RefractionCorrection, SunriseResult},
    Horizon,
};
use std::f64::consts::TAU;
use zonewise_core::ValidationError;

/// Apparent angular radius of the solar disc, degrees
pub const SOLAR_RADIUS_DEG: f64 = 0.266;

/// Civil, nautical and astronomical twilight depressions, degrees
const CIVIL_TWILIGHT_DEG: f64 = -6.0;
const NAUTICAL_TWILIGHT_DEG: f64 = -12.0;
const ASTRONOMICAL_TWILIGHT_DEG: f64 = -18.0;

/// Sun elevation that bounds the golden hour, degrees
const GOLDEN_HOUR_DEG: f64 = 6.0;

/// Bisection stops once the bracket is this narrow
const EVENT_PRECISION_MS: i64 = 500;

/// Sun position for one instant and place
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SunPosition {
    /// 0 = North, clockwise, in [0, 2π)
    pub azimuth_rad: f64,
    /// Apparent height above the horizon, in [-π/2, π/2]
    pub altitude_rad: f64,
    /// `altitude_rad > 0`
    pub is_day: bool,
}

impl SunPosition {
    /// Unit vector toward the sun in render space (x east, y up, z south)
    pub fn direction(&self) -> Vector3<f64> {
        let (sin_az, cos_az) = self.azimuth_rad.sin_cos();
        let (sin_alt, cos_alt) = self.altitude_rad.sin_cos();
        Vector3::new(cos_alt * sin_az, sin_alt, -cos_alt * cos_az)
    }

    pub fn azimuth_deg(&self) -> f64 {
        self.azimuth_rad.to_degrees()
    }

    pub fn altitude_deg(&self) -> f64 {
        self.altitude_rad.to_degrees()
    }
}

/// Sun events for one day and place
///
/// Events that do not happen (polar day or night) are `None`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SunTimes {
    pub solar_noon: DateTime<Utc>,
    pub nadir: DateTime<Utc>,
    pub sunrise: Option<DateTime<Utc>>,
    pub sunset: Option<DateTime<Utc>>,
    pub sunrise_end: Option<DateTime<Utc>>,
    pub sunset_start: Option<DateTime<Utc>>,
    pub dawn: Option<DateTime<Utc>>,
    pub dusk: Option<DateTime<Utc>>,
    pub nautical_dawn: Option<DateTime<Utc>>,
    pub nautical_dusk: Option<DateTime<Utc>>,
    pub night_end: Option<DateTime<Utc>>,
    pub night: Option<DateTime<Utc>>,
    pub golden_hour_end: Option<DateTime<Utc>>,
    pub golden_hour: Option<DateTime<Utc>>,
}

fn ephemeris(err: impl std::fmt::Display) -> Error {
    Error::Ephemeris(err.to_string())
}

fn validate_location(lat: f64, lon: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&lat) {
        return Err(ValidationError::LatitudeOutOfRange(lat).into());
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(ValidationError::LongitudeOutOfRange(lon).into());
    }
    Ok(())
}

fn delta_t_for(t: DateTime<Utc>) -> Result<f64> {
    DeltaT::estimate_from_date(t.year(), t.month()).map_err(ephemeris)
}

/// Observer plus the elevation an event is defined by
#[derive(Clone, Copy)]
struct Crossing {
    lat: f64,
    lon: f64,
    delta_t: f64,
    refraction: Option<RefractionCorrection>,
    /// Sun elevation of the event, degrees
    target: f64,
}

impl Crossing {
    fn elevation_error(&self, t: DateTime<Utc>) -> Result<f64> {
        let pos = spa::solar_position(t, self.lat, self.lon, 0.0, self.delta_t, self.refraction)
            .map_err(ephemeris)?;
        Ok(pos.elevation_angle() - self.target)
    }

    /// Bisection for the instant in `[a, b]` where the sun crosses `target`
    fn solve(&self, mut a: DateTime<Utc>, mut b: DateTime<Utc>) -> Result<Option<DateTime<Utc>>> {
        let mut fa = self.elevation_error(a)?;
        let fb = self.elevation_error(b)?;
        if !fa.is_finite() || !fb.is_finite() || fa.signum() == fb.signum() {
            return Ok(None);
        }

        let precision = Duration::milliseconds(EVENT_PRECISION_MS);
        while b - a > precision {
            let m = a + (b - a) / 2;
            let fm = self.elevation_error(m)?;
            if fm.signum() == fa.signum() {
                a = m;
                fa = fm;
            } else {
                b = m;
            }
        }
        Ok(Some(a + (b - a) / 2))
    }

    /// Rising and setting crossings around `transit`
    fn around(
        &self,
        transit: DateTime<Utc>,
    ) -> Result<(Option<DateTime<Utc>>, Option<DateTime<Utc>>)> {
        let span = Duration::hours(12);
        Ok((
            self.solve(transit - span, transit)?,
            self.solve(transit, transit + span)?,
        ))
    }
}

/// Sun azimuth/altitude at `t` for an observer at `lat`, `lon` (degrees)
pub fn sun_position(t: DateTime<Utc>, lat: f64, lon: f64) -> Result<SunPosition> {
    validate_location(lat, lon)?;
    let delta_t = delta_t_for(t)?;
    let pos = spa::solar_position(
        t,
        lat,
        lon,
        0.0,
        delta_t,
        Some(RefractionCorrection::standard()),
    )
    .map_err(ephemeris)?;

    let altitude_rad = pos.elevation_angle().to_radians();
    Ok(SunPosition {
        azimuth_rad: pos.azimuth().to_radians().rem_euclid(TAU),
        altitude_rad,
        is_day: altitude_rad > 0.0,
    })
}

/// Sun events for the UTC calendar day of `reference`
pub fn sun_times(reference: DateTime<Utc>, lat: f64, lon: f64) -> Result<SunTimes> {
    validate_location(lat, lon)?;
    let delta_t = delta_t_for(reference)?;

    let transit =
        match spa::sunrise_sunset_for_horizon(reference, lat, lon, delta_t, Horizon::SunriseSunset)
            .map_err(ephemeris)?
        {
            SunriseResult::RegularDay { transit, .. }
            | SunriseResult::AllDay { transit }
            | SunriseResult::AllNight { transit } => transit,
        };

    let apparent = Some(RefractionCorrection::standard());
    let crossing = |target: f64, refraction: Option<RefractionCorrection>| Crossing {
        lat,
        lon,
        delta_t,
        refraction,
        target,
    };

    // Upper limb on the horizon; twilights are geometric
    let (sunrise, sunset) = crossing(-SOLAR_RADIUS_DEG, apparent).around(transit)?;
    let (sunrise_end, sunset_start) = crossing(SOLAR_RADIUS_DEG, apparent).around(transit)?;
    let (dawn, dusk) = crossing(CIVIL_TWILIGHT_DEG, None).around(transit)?;
    let (nautical_dawn, nautical_dusk) = crossing(NAUTICAL_TWILIGHT_DEG, None).around(transit)?;
    let (night_end, night) = crossing(ASTRONOMICAL_TWILIGHT_DEG, None).around(transit)?;
    let (golden_hour_end, golden_hour) = crossing(GOLDEN_HOUR_DEG, apparent).around(transit)?;

    Ok(SunTimes {
        solar_noon: transit,
        nadir: transit - Duration::hours(12),
        sunrise,
        sunset,
        sunrise_end,
        sunset_start,
        dawn,
        dusk,
        nautical_dawn,
        nautical_dusk,
        night_end,
        night,
        golden_hour_end,
        golden_hour,
    })
}

/// Approximate local solar midday of a calendar date at `lon`
pub fn local_midday(date: NaiveDate, lon: f64) -> Result<DateTime<Utc>> {
    let noon = date.and_hms_opt(12, 0, 0).ok_or(Error::InvalidDate(date))?;
    let offset_ms = (lon / 15.0 * 3_600_000.0).round() as i64;
    Ok(Utc.from_utc_datetime(&noon) - Duration::milliseconds(offset_ms))
}

/// Sun events for the local calendar day `date`
pub fn sun_times_on(date: NaiveDate, lat: f64, lon: f64) -> Result<SunTimes> {
    sun_times(local_midday(date, lon)?, lat, lon)
}

/// Hours between sunrise and sunset; 24 under midnight sun, 0 in polar night
pub fn daylight_hours(date: NaiveDate, lat: f64, lon: f64) -> Result<f64> {
    let times = sun_times_on(date, lat, lon)?;
    daylight_hours_from(&times, lat, lon)
}

pub(crate) fn daylight_hours_from(times: &SunTimes, lat: f64, lon: f64) -> Result<f64> {
    Ok(match (times.sunrise, times.sunset) {
        (Some(rise), Some(set)) => (set - rise).num_milliseconds() as f64 / 3_600_000.0,
        _ if sun_position(times.solar_noon, lat, lon)?.is_day => 24.0,
        _ => 0.0,
    })
}

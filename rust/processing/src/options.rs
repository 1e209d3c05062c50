// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Site analysis options

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use zonewise_core::GeoPoint;
use zonewise_solar::ShadowConfig;

/// What to compute beyond the envelope itself
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteAnalysisOptions {
    /// Run the shadow sampler with the envelope as occluder
    pub shadow: Option<ShadowSettings>,
}

impl SiteAnalysisOptions {
    pub fn with_shadow(date: NaiveDate) -> Self {
        Self {
            shadow: Some(ShadowSettings::new(date)),
        }
    }
}

/// Shadow pass settings; the location is always the lot centroid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShadowSettings {
    pub date: NaiveDate,
    /// Grid edge length; `None` fits the grid to the lot's larger extent
    #[serde(default)]
    pub grid_size_meters: Option<f64>,
    #[serde(default)]
    pub resolution_meters: Option<f64>,
    #[serde(default)]
    pub time_step_minutes: Option<u32>,
}

impl ShadowSettings {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            grid_size_meters: None,
            resolution_meters: None,
            time_step_minutes: None,
        }
    }

    /// Sampler config centered on `center`, sized to `lot_extent_m` when no
    /// explicit grid size was given
    pub fn to_config(&self, center: GeoPoint, lot_extent_m: f64) -> ShadowConfig {
        let mut config = ShadowConfig::new(self.date, center);
        if let Some(resolution) = self.resolution_meters {
            config.resolution_meters = resolution;
        }
        config.grid_size_meters = match self.grid_size_meters {
            Some(size) => size,
            None if lot_extent_m > 0.0 => lot_extent_m.max(config.resolution_meters),
            None => config.grid_size_meters,
        };
        if let Some(step) = self.time_step_minutes {
            config.time_step_minutes = step;
        }
        config
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Site analysis: envelope first, then an optional shadow pass that uses
//! the envelope solid as its own occluder.

use crate::error::Result;
use crate::options::SiteAnalysisOptions;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Instant;
use zonewise_core::{LocalFrame, LotPolygon, ZoningLimits};
use zonewise_geometry::{generate_envelope, to_geojson, to_json, EnvelopeResult};
use zonewise_solar::{analyze_shadows, ShadowGrid};

/// Envelope plus optional exposure summary for one lot
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteAnalysis {
    pub envelope: EnvelopeResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow: Option<ShadowGrid>,
    /// Mean sun hours over the shadow grid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_sun_hours: Option<f64>,
}

/// One lot of a batch
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteRequest {
    pub lot: LotPolygon,
    pub limits: ZoningLimits,
    #[serde(default)]
    pub options: SiteAnalysisOptions,
}

pub fn analyze_site(
    lot: &LotPolygon,
    limits: &ZoningLimits,
    options: &SiteAnalysisOptions,
) -> Result<SiteAnalysis> {
    let start = Instant::now();
    tracing::info!(
        district = %limits.district_code,
        vertices = lot.vertices().len(),
        shadow = options.shadow.is_some(),
        "Site analysis started"
    );

    let envelope = generate_envelope(lot, limits)?;

    let shadow = match &options.shadow {
        Some(settings) => {
            let frame = LocalFrame::new(envelope.reference_center);
            let (width, depth) = lot.local_extent(&frame);
            let config = settings.to_config(envelope.reference_center, width.max(depth));
            let occluders = std::slice::from_ref(&envelope.solid_geometry);
            Some(analyze_shadows(&config, occluders)?)
        }
        None => None,
    };
    let average_sun_hours = shadow.as_ref().map(ShadowGrid::average_sun_hours);

    tracing::info!(
        district = %limits.district_code,
        buildable_sq_ft = envelope.max_buildable_area_sq_ft,
        setback_degenerate = envelope.setback_degenerate,
        average_sun_hours = ?average_sun_hours,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Site analysis finished"
    );

    Ok(SiteAnalysis {
        envelope,
        shadow,
        average_sun_hours,
    })
}

/// Analyze independent lots in parallel; results keep request order
pub fn analyze_sites(requests: &[SiteRequest]) -> Vec<Result<SiteAnalysis>> {
    requests
        .par_iter()
        .map(|r| analyze_site(&r.lot, &r.limits, &r.options))
        .collect()
}

/// JSON report: inputs, envelope, GeoJSON overlay and exposure summary
pub fn site_report(
    lot: &LotPolygon,
    limits: &ZoningLimits,
    analysis: &SiteAnalysis,
) -> Result<Value> {
    let mut report = to_json(lot, limits, &analysis.envelope)?;
    report["geojson"] = to_geojson(lot, limits, &analysis.envelope);
    if let Some(grid) = &analysis.shadow {
        report["shadow"] = json!({
            "gridSize": grid.size,
            "resolutionMeters": grid.resolution_meters,
            "daylightHours": grid.daylight_hours,
            "timeSamples": grid.time_samples,
            "averageSunHours": grid.average_sun_hours(),
            "minSunHours": grid.min_sun_hours(),
            "maxSunHours": grid.max_sun_hours(),
        });
    }
    Ok(report)
}

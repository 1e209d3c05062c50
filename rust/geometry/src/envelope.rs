// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Buildable envelope generation
//!
//! Entry point of the geometry engine: lot polygon + zoning limits in,
//! solid + rounded metrics out. Deterministic and free of shared state.

use crate::error::{Error, GeometryStage, Result};
use crate::extrusion::extrude_profile;
use crate::profile::Profile2D;
use crate::setback::apply_setbacks_in_frame;
use crate::solid::Solid;
use serde::Serialize;
use zonewise_core::{
    feet_to_meters, meters_to_feet, sq_meters_to_sq_feet, ComplianceFlags, GeoPoint, LocalFrame,
    LotPolygon, ZoningLimits,
};

/// Storey height assumed when converting max height to a floor count
pub const FLOOR_HEIGHT_FT: f64 = 10.0;

/// Maximum buildable envelope for one lot under one set of limits
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvelopeResult {
    /// Render-space solid, meters relative to `reference_center`
    pub solid_geometry: Solid,
    pub max_buildable_area_sq_ft: u64,
    pub max_gfa_sq_ft: u64,
    pub envelope_volume_cu_ft: u64,
    pub max_floors: u32,
    pub lot_area_sq_ft: u64,
    /// Lot centroid; origin of every local and render coordinate
    pub reference_center: GeoPoint,
    /// Closed geographic ring of the buildable area
    pub buildable_area: Vec<GeoPoint>,
    /// Uniform inset that was applied, in feet
    pub inset_distance_ft: f64,
    /// Setbacks consumed the lot; `buildable_area` is a minimal stand-in
    pub setback_degenerate: bool,
    pub compliance: ComplianceFlags,
}

/// Generate the maximum buildable envelope
///
/// Limits are validated before any geometry work. Setbacks that consume the
/// lot do not fail; the result is flagged via `setback_degenerate`.
pub fn generate_envelope(lot: &LotPolygon, limits: &ZoningLimits) -> Result<EnvelopeResult> {
    limits.validate()?;

    if !lot.is_simple() {
        return Err(Error::geometry(
            GeometryStage::Validation,
            "lot boundary self-intersects",
        ));
    }

    let reference_center = lot.centroid();
    let frame = LocalFrame::new(reference_center);

    if let Some(far_point) = lot.vertices().iter().find(|p| !frame.is_within_valid_extent(**p)) {
        tracing::warn!(
            lon = far_point.lon,
            lat = far_point.lat,
            "Lot extends beyond the local frame's validity range; areas are approximate"
        );
    }

    let lot_profile = Profile2D::from_geo_ring(lot.ring(), &frame);
    let lot_area_sq_ft = sq_meters_to_sq_feet(lot_profile.area());

    let buildable = apply_setbacks_in_frame(lot, &limits.setbacks, &frame)?;
    let buildable_area_sq_ft = sq_meters_to_sq_feet(buildable.area_sq_m());

    let max_gfa_sq_ft = lot_area_sq_ft * limits.max_far;
    let max_floors = (limits.max_height_ft / FLOOR_HEIGHT_FT).floor() as u32;
    let envelope_volume_cu_ft = buildable_area_sq_ft * limits.max_height_ft;

    let solid_geometry = extrude_profile(&buildable.profile, feet_to_meters(limits.max_height_ft))?;

    let (width_m, depth_m) = lot.local_extent(&frame);
    let compliance = limits.check_lot(lot_area_sq_ft, meters_to_feet(width_m.min(depth_m)));

    tracing::debug!(
        district = %limits.district_code,
        lot_area_sq_ft,
        buildable_area_sq_ft,
        degenerate = buildable.degenerate,
        "Generated envelope"
    );

    Ok(EnvelopeResult {
        solid_geometry,
        max_buildable_area_sq_ft: round_metric(buildable_area_sq_ft),
        max_gfa_sq_ft: round_metric(max_gfa_sq_ft),
        envelope_volume_cu_ft: round_metric(envelope_volume_cu_ft),
        max_floors,
        lot_area_sq_ft: round_metric(lot_area_sq_ft),
        reference_center,
        buildable_area: buildable.ring,
        inset_distance_ft: meters_to_feet(buildable.inset_distance_m),
        setback_degenerate: buildable.degenerate,
        compliance,
    })
}

/// Round a non-negative metric to the nearest integer
#[inline]
fn round_metric(value: f64) -> u64 {
    value.max(0.0).round() as u64
}

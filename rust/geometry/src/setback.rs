// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Setback inset: lot polygon to buildable-area polygon
//!
//! The lot is inset by one uniform distance, the weighted average of the
//! front/side/rear setbacks (`(front + 2*side + rear) / 4`). Edges are not
//! classified by frontage.
//!
//! The inset is a mitered polygon offset by Clipper2, so every edge moves
//! inward by the full distance and edges the inset swallows disappear. Parts
//! of the lot narrower than twice the distance vanish, which can split the
//! buildable area; only its largest piece is kept.
//!
//! When the setbacks consume the whole lot, a small polygon around the lot
//! centroid stands in for the buildable area and the result is flagged
//! `degenerate` instead of failing.

use crate::error::{Error, GeometryStage, Result};
use crate::profile::{create_circle, Profile2D};
use clipper2::{EndType, JoinType, Paths};
use i_overlay::core::fill_rule::FillRule;
use i_overlay::core::overlay_rule::OverlayRule;
use i_overlay::float::single::SingleFloatOverlay;
use nalgebra::Point2;
use zonewise_core::{feet_to_meters, GeoPoint, LocalFrame, LotPolygon, Setbacks};

/// Radius of the stand-in polygon used when setbacks consume the lot
pub const FALLBACK_RADIUS_M: f64 = 1.0;

/// Segments of the stand-in polygon
const FALLBACK_SEGMENTS: usize = 16;

/// Inset results smaller than this are treated as collapsed
pub const MIN_BUILDABLE_AREA_SQ_M: f64 = 1e-3;

/// Miter joins longer than this multiple of the inset are squared off
const MITER_LIMIT: f64 = 2.0;

/// Buildable area derived from a lot and its setbacks
#[derive(Debug, Clone)]
pub struct BuildableArea {
    /// Local-frame profile (meters, counter-clockwise)
    pub profile: Profile2D,
    /// Closed geographic ring for 2D map overlays
    pub ring: Vec<GeoPoint>,
    /// Uniform inset distance that was applied
    pub inset_distance_m: f64,
    /// True when the setbacks consumed the lot and the fallback was used
    pub degenerate: bool,
}

impl BuildableArea {
    #[inline]
    pub fn area_sq_m(&self) -> f64 {
        self.profile.area()
    }
}

/// Apply setbacks in the lot-centroid frame
pub fn apply_setbacks(lot: &LotPolygon, setbacks: &Setbacks) -> Result<BuildableArea> {
    apply_setbacks_in_frame(lot, setbacks, &LocalFrame::new(lot.centroid()))
}

/// Apply setbacks with an explicit local frame
pub fn apply_setbacks_in_frame(
    lot: &LotPolygon,
    setbacks: &Setbacks,
    frame: &LocalFrame,
) -> Result<BuildableArea> {
    setbacks.validate()?;

    let lot_profile = Profile2D::from_geo_ring(lot.ring(), frame);
    if lot_profile.is_degenerate(0.0) {
        return Err(Error::geometry(
            GeometryStage::Inset,
            "lot polygon has no enclosed area",
        ));
    }

    let inset_distance_m = feet_to_meters(setbacks.weighted_average_ft());
    tracing::debug!(
        inset_distance_m,
        vertices = lot_profile.outer.len(),
        "Applying uniform setback inset"
    );

    let (profile, degenerate) = match inset_profile(&lot_profile, inset_distance_m) {
        Some(inset) => (inset, false),
        None => {
            tracing::warn!(
                inset_distance_m,
                lot_area_sq_m = lot_profile.area(),
                "Setbacks exceed lot capacity; using minimal buildable area"
            );
            (fallback_profile(&lot_profile), true)
        }
    };

    let ring = profile.to_geo_ring(frame);
    Ok(BuildableArea {
        profile,
        ring,
        inset_distance_m,
        degenerate,
    })
}

/// Inset a counter-clockwise profile by `distance` meters
///
/// Returns `None` when the inset collapses the polygon. When the inset
/// splits the lot (a narrow corridor between two wider parts), the largest
/// piece is kept.
pub fn inset_profile(profile: &Profile2D, distance: f64) -> Option<Profile2D> {
    if profile.outer.len() < 3 {
        return None;
    }
    if distance <= 0.0 {
        return Some(profile.clone());
    }

    let coords: Vec<(f64, f64)> = profile.outer.iter().map(|p| (p.x, p.y)).collect();
    let paths: Paths = vec![coords].into();

    // inflate(delta, join_type, end_type, miter_limit)
    let result = paths.inflate(-distance, JoinType::Miter, EndType::Polygon, MITER_LIMIT);
    let output: Vec<Vec<(f64, f64)>> = result.into();

    output
        .into_iter()
        .filter(|path| path.len() >= 3)
        .map(|path| Profile2D::new(path.into_iter().map(|(x, y)| Point2::new(x, y)).collect()))
        .filter(|piece| !piece.is_degenerate(MIN_BUILDABLE_AREA_SQ_M))
        .max_by(|a, b| a.area().total_cmp(&b.area()))
}

/// Intersect `subject` with `bounds`, keeping the largest resulting shape
fn clip_to(subject: &[Point2<f64>], bounds: &[Point2<f64>]) -> Option<Profile2D> {
    let subject_paths = vec![contour_to_path(subject)];
    let clip_paths = vec![contour_to_path(bounds)];

    let shapes = subject_paths.overlay(&clip_paths, OverlayRule::Intersect, FillRule::NonZero);

    shapes
        .into_iter()
        .filter_map(|shape| shape.into_iter().next())
        .map(|contour| {
            let mut points: Vec<Point2<f64>> =
                contour.into_iter().map(|p| Point2::new(p[0], p[1])).collect();
            if points.len() > 1 && points.first() == points.last() {
                points.pop();
            }
            Profile2D::new(points)
        })
        .filter(|p| p.outer.len() >= 3)
        .max_by(|a, b| a.area().total_cmp(&b.area()))
}

/// Stand-in buildable area: a small circle at the frame origin, clipped to
/// the lot when they overlap
fn fallback_profile(lot: &Profile2D) -> Profile2D {
    let circle = create_circle(Point2::origin(), FALLBACK_RADIUS_M, FALLBACK_SEGMENTS);
    match clip_to(&circle.outer, &lot.outer) {
        Some(clipped) if !clipped.is_degenerate(0.0) => clipped,
        _ => circle,
    }
}

/// Convert a Point2 contour to i_overlay path format
fn contour_to_path(contour: &[Point2<f64>]) -> Vec<[f64; 2]> {
    contour.iter().map(|p| [p.x, p.y]).collect()
}

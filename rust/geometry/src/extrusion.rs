// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Extrusion operations - converting 2D profiles to closed 3D solids
//!
//! Profiles live in the local frame (x east, y north); solids are emitted in
//! render space (x east, y up, z south). The bottom cap sits at y = 0 facing
//! down, the top cap at y = height facing up, and every ring edge gets one
//! wall quad (two triangles) sharing a flat outward normal.

use crate::error::{Error, Result};
use crate::profile::{Profile2D, Triangulation};
use crate::solid::Solid;
use nalgebra::{Point2, Point3, Vector3};
use zonewise_core::{feet_to_meters, GeoPoint, LocalFrame, ValidationError};

/// Extrude a geographic ring to `height_ft`, relative to `reference_center`
pub fn extrude(ring: &[GeoPoint], height_ft: f64, reference_center: GeoPoint) -> Result<Solid> {
    if !(height_ft > 0.0) || !height_ft.is_finite() {
        return Err(Error::Validation(ValidationError::NonPositiveHeight(height_ft)));
    }
    let profile = Profile2D::from_geo_ring(ring, &LocalFrame::new(reference_center));
    extrude_profile(&profile, feet_to_meters(height_ft))
}

/// Extrude a local profile upward by `height_m` meters
///
/// A profile too degenerate to triangulate yields an empty solid rather
/// than an error.
pub fn extrude_profile(profile: &Profile2D, height_m: f64) -> Result<Solid> {
    if !(height_m > 0.0) || !height_m.is_finite() {
        return Err(Error::Validation(ValidationError::NonPositiveHeight(height_m)));
    }

    if profile.is_degenerate(0.0) {
        return Ok(Solid::new());
    }

    let triangulation = profile.triangulate()?;
    if triangulation.indices.len() < 3 {
        return Ok(Solid::new());
    }

    let ring = render_ring(&profile.outer);
    let cap_triangles = triangulation.indices.len() / 3;
    let mut solid = Solid::with_capacity(cap_triangles * 2 + ring.len() * 2);

    create_cap(&triangulation, 0.0, -Vector3::y(), &mut solid);
    create_cap(&triangulation, height_m, Vector3::y(), &mut solid);
    create_side_walls(&ring, height_m, &mut solid);

    tracing::debug!(
        triangles = solid.triangle_count(),
        height_m,
        "Extruded envelope solid"
    );

    Ok(solid)
}

/// Ring in the render ground plane `(x, z = -y)`, counter-clockwise there
fn render_ring(outer: &[Point2<f64>]) -> Vec<Point2<f64>> {
    // Negating north mirrors the ring, so a counter-clockwise local ring
    // becomes clockwise in (x, z) and is walked backwards
    outer.iter().rev().map(|p| Point2::new(p.x, -p.y)).collect()
}

/// Create a cap (top or bottom) from the triangulation
#[inline]
fn create_cap(triangulation: &Triangulation, y: f64, normal: Vector3<f64>, solid: &mut Solid) {
    let lift = |p: &Point2<f64>| Point3::new(p.x, y, -p.y);
    for tri in triangulation.indices.chunks_exact(3) {
        solid.add_triangle(
            lift(&triangulation.points[tri[0]]),
            lift(&triangulation.points[tri[1]]),
            lift(&triangulation.points[tri[2]]),
            normal,
        );
    }
}

/// Create one wall quad per ring edge, including the closing edge
#[inline]
fn create_side_walls(ring: &[Point2<f64>], height: f64, solid: &mut Solid) {
    let n = ring.len();
    for i in 0..n {
        let p0 = ring[i];
        let p1 = ring[(i + 1) % n];

        let (dx, dz) = (p1.x - p0.x, p1.y - p0.y);
        let len = dx.hypot(dz);
        if len < 1e-10 {
            // Skip degenerate edge (duplicate points in profile)
            continue;
        }
        let normal = Vector3::new(dz / len, 0.0, -dx / len);

        let b0 = Point3::new(p0.x, 0.0, p0.y);
        let b1 = Point3::new(p1.x, 0.0, p1.y);
        let t0 = Point3::new(p0.x, height, p0.y);
        let t1 = Point3::new(p1.x, height, p1.y);

        solid.add_triangle(b0, b1, t1, normal);
        solid.add_triangle(b0, t1, t0, normal);
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Polygon triangulation utilities
//!
//! Wrapper around earcutr for simple (possibly non-convex) 2D rings.

use crate::error::{Error, GeometryStage, Result};
use nalgebra::Point2;

/// Turns below this cross-product magnitude count as straight
const COLLINEAR_EPSILON: f64 = 1e-10;

/// Signed turn at each corner of a closed ring, in ring order
fn turns(ring: &[Point2<f64>]) -> impl Iterator<Item = f64> + '_ {
    let n = ring.len();
    (0..n).map(move |i| {
        let (a, b, c) = (ring[i], ring[(i + 1) % n], ring[(i + 2) % n]);
        (b - a).perp(&(c - b))
    })
}

/// True when the ring never turns both left and right, in either winding
pub fn is_convex(ring: &[Point2<f64>]) -> bool {
    if ring.len() < 3 {
        return false;
    }
    let (left, right) = turns(ring).fold((false, false), |(left, right), turn| {
        (left || turn > COLLINEAR_EPSILON, right || turn < -COLLINEAR_EPSILON)
    });
    !(left && right)
}

/// Triangulate a simple ring without holes
///
/// Returns a flat list of triangle indices into `points`. Convex rings are
/// fanned from their first vertex, anything else is ear-clipped by earcutr.
pub fn triangulate_polygon(points: &[Point2<f64>]) -> Result<Vec<usize>> {
    let n = points.len();
    if n < 3 {
        return Err(Error::geometry(
            GeometryStage::Triangulation,
            format!("ring has {} points, need at least 3", n),
        ));
    }

    if is_convex(points) {
        return Ok((1..n - 1).flat_map(|i| [0, i, i + 1]).collect());
    }

    let coords: Vec<f64> = points.iter().flat_map(|p| [p.x, p.y]).collect();
    earcutr::earcut(&coords, &[], 2)
        .map_err(|e| Error::geometry(GeometryStage::Triangulation, format!("{:?}", e)))
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Solid geometry buffers
//!
//! A [`Solid`] is an unindexed triangle soup: every three consecutive
//! vertices form one triangle, and `normals` runs parallel to `positions`.
//! Coordinates are render-space meters relative to the envelope's
//! reference center (x = east, y = up, z = south).

use nalgebra::{Point3, Vector3};
use serde::Serialize;

/// Closed triangulated solid with flat per-face normals
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Solid {
    /// Vertex positions (x, y, z)
    pub positions: Vec<f32>,
    /// Vertex normals (nx, ny, nz), one per position
    pub normals: Vec<f32>,
}

impl Solid {
    /// Create a new empty solid
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a solid with room for `triangle_count` triangles
    pub fn with_capacity(triangle_count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(triangle_count * 9),
            normals: Vec::with_capacity(triangle_count * 9),
        }
    }

    #[inline]
    fn push_vertex(&mut self, position: &Point3<f64>, normal: &Vector3<f64>) {
        self.positions
            .extend_from_slice(&[position.x as f32, position.y as f32, position.z as f32]);
        self.normals
            .extend_from_slice(&[normal.x as f32, normal.y as f32, normal.z as f32]);
    }

    /// Add a triangle whose winding is made to agree with `normal`
    ///
    /// The vertex order is swapped when the geometric normal `(b-a)×(c-a)`
    /// points away from `normal`, so counter-clockwise always faces out.
    #[inline]
    pub fn add_triangle(
        &mut self,
        a: Point3<f64>,
        b: Point3<f64>,
        c: Point3<f64>,
        normal: Vector3<f64>,
    ) {
        let geometric = (b - a).cross(&(c - a));
        self.push_vertex(&a, &normal);
        if geometric.dot(&normal) < 0.0 {
            self.push_vertex(&c, &normal);
            self.push_vertex(&b, &normal);
        } else {
            self.push_vertex(&b, &normal);
            self.push_vertex(&c, &normal);
        }
    }

    /// Merge another solid into this one
    pub fn merge(&mut self, other: &Solid) {
        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 9
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Iterate over triangles in f64
    pub fn triangles(&self) -> impl Iterator<Item = [Point3<f64>; 3]> + '_ {
        self.positions.chunks_exact(9).map(|c| {
            [
                Point3::new(c[0] as f64, c[1] as f64, c[2] as f64),
                Point3::new(c[3] as f64, c[4] as f64, c[5] as f64),
                Point3::new(c[6] as f64, c[7] as f64, c[8] as f64),
            ]
        })
    }

    /// Per-triangle stored normal (taken from the first vertex)
    pub fn face_normals(&self) -> impl Iterator<Item = Vector3<f64>> + '_ {
        self.normals
            .chunks_exact(9)
            .map(|c| Vector3::new(c[0] as f64, c[1] as f64, c[2] as f64))
    }

    /// Calculate bounds (min, max)
    pub fn bounds(&self) -> (Point3<f32>, Point3<f32>) {
        if self.is_empty() {
            return (Point3::origin(), Point3::origin());
        }

        let mut min = Point3::new(f32::MAX, f32::MAX, f32::MAX);
        let mut max = Point3::new(f32::MIN, f32::MIN, f32::MIN);

        self.positions.chunks_exact(3).for_each(|chunk| {
            min.x = min.x.min(chunk[0]);
            min.y = min.y.min(chunk[1]);
            min.z = min.z.min(chunk[2]);
            max.x = max.x.max(chunk[0]);
            max.y = max.y.max(chunk[1]);
            max.z = max.z.max(chunk[2]);
        });

        (min, max)
    }

    /// Enclosed volume via the divergence theorem (m³ for envelope solids)
    ///
    /// Only meaningful for closed, consistently wound solids.
    pub fn volume(&self) -> f64 {
        self.triangles()
            .map(|[a, b, c]| a.coords.dot(&b.coords.cross(&c.coords)) / 6.0)
            .sum()
    }
}

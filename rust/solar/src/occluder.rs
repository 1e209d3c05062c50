// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ray queries against occluder solids.

use nalgebra::{Point3, Vector3};
use zonewise_geometry::Solid;

const PARALLEL_EPSILON: f64 = 1e-12;
const HIT_EPSILON: f64 = 1e-9;

/// Axis-aligned bounding box in render space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl Aabb {
    /// Slab test: does the ray `origin + t * dir` (t > 0) touch the box?
    pub fn hit_by(&self, origin: &Point3<f64>, dir: &Vector3<f64>) -> bool {
        let mut t_min = 0.0_f64;
        let mut t_max = f64::INFINITY;

        for axis in 0..3 {
            let o = origin[axis];
            let d = dir[axis];
            let (lo, hi) = (self.min[axis], self.max[axis]);

            if d.abs() < PARALLEL_EPSILON {
                if o < lo || o > hi {
                    return false;
                }
                continue;
            }

            let inv = 1.0 / d;
            let mut t0 = (lo - o) * inv;
            let mut t1 = (hi - o) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return false;
            }
        }
        true
    }
}

/// Triangles of one occluder solid plus their bounding box
#[derive(Debug, Clone)]
pub struct Occluder {
    triangles: Vec<[Point3<f64>; 3]>,
    bounds: Option<Aabb>,
}

impl Occluder {
    pub fn from_solid(solid: &Solid) -> Self {
        let triangles: Vec<[Point3<f64>; 3]> = solid.triangles().collect();
        let bounds = (!triangles.is_empty()).then(|| {
            let (min, max) = solid.bounds();
            Aabb {
                min: min.cast::<f64>(),
                max: max.cast::<f64>(),
            }
        });
        Self { triangles, bounds }
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn bounds(&self) -> Option<Aabb> {
        self.bounds
    }

    /// True if the ray from `origin` along `dir` hits any triangle
    pub fn blocks(&self, origin: &Point3<f64>, dir: &Vector3<f64>) -> bool {
        match &self.bounds {
            Some(aabb) if aabb.hit_by(origin, dir) => self
                .triangles
                .iter()
                .any(|[a, b, c]| ray_intersects_triangle(origin, dir, a, b, c)),
            _ => false,
        }
    }
}

/// Möller–Trumbore ray-triangle intersection test.
///
/// Casts a ray from `origin` along `dir` and tests if it hits the
/// triangle (v0, v1, v2) in front of the origin. Both windings count.
pub fn ray_intersects_triangle(
    origin: &Point3<f64>,
    dir: &Vector3<f64>,
    v0: &Point3<f64>,
    v1: &Point3<f64>,
    v2: &Point3<f64>,
) -> bool {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let h = dir.cross(&edge2);
    let a = edge1.dot(&h);

    if a.abs() < PARALLEL_EPSILON {
        return false; // ray parallel to triangle
    }

    let f = 1.0 / a;
    let s = origin - v0;
    let u = f * s.dot(&h);

    if !(0.0..=1.0).contains(&u) {
        return false;
    }

    let q = s.cross(&edge1);
    let v = f * dir.dot(&q);

    if v < 0.0 || u + v > 1.0 {
        return false;
    }

    let t = f * edge2.dot(&q);
    t > HIT_EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;
    use zonewise_geometry::{extrude_profile, Profile2D};

    fn unit_box() -> Solid {
        // 10 m square footprint centered on the origin, 10 m tall
        let profile = Profile2D::new(vec![
            nalgebra::Point2::new(-5.0, -5.0),
            nalgebra::Point2::new(5.0, -5.0),
            nalgebra::Point2::new(5.0, 5.0),
            nalgebra::Point2::new(-5.0, 5.0),
        ]);
        extrude_profile(&profile, 10.0).unwrap()
    }

    #[test]
    fn test_triangle_hit_and_miss() {
        let v0 = Point3::new(0.0, 1.0, 0.0);
        let v1 = Point3::new(1.0, 1.0, 0.0);
        let v2 = Point3::new(0.0, 1.0, 1.0);
        let up = Vector3::new(0.0, 1.0, 0.0);

        assert!(ray_intersects_triangle(&Point3::new(0.2, 0.0, 0.2), &up, &v0, &v1, &v2));
        assert!(!ray_intersects_triangle(&Point3::new(0.8, 0.0, 0.8), &up, &v0, &v1, &v2));
        // Behind the origin
        assert!(!ray_intersects_triangle(&Point3::new(0.2, 2.0, 0.2), &up, &v0, &v1, &v2));
    }

    #[test]
    fn test_aabb_slab() {
        let aabb = Aabb {
            min: Point3::new(-1.0, 0.0, -1.0),
            max: Point3::new(1.0, 2.0, 1.0),
        };
        let origin = Point3::new(-5.0, 1.0, 0.0);
        assert!(aabb.hit_by(&origin, &Vector3::new(1.0, 0.0, 0.0)));
        assert!(!aabb.hit_by(&origin, &Vector3::new(-1.0, 0.0, 0.0)));
        assert!(!aabb.hit_by(&origin, &Vector3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn test_box_blocks_low_sun_behind_it() {
        let occluder = Occluder::from_solid(&unit_box());
        assert_eq!(occluder.triangle_count(), 12);

        // Point 10 m north of the box (z = -10), sun low in the south (+z)
        let origin = Point3::new(0.0, 0.1, -10.0);
        let toward_south = Vector3::new(0.0, 0.3, 1.0).normalize();
        assert!(occluder.blocks(&origin, &toward_south));

        // Same point, sun in the north
        let toward_north = Vector3::new(0.0, 0.3, -1.0).normalize();
        assert!(!occluder.blocks(&origin, &toward_north));
    }

    #[test]
    fn test_empty_solid_never_blocks() {
        let occluder = Occluder::from_solid(&Solid::new());
        assert!(occluder.bounds().is_none());
        assert!(!occluder.blocks(&Point3::origin(), &Vector3::new(0.0, 1.0, 0.0)));
    }
}

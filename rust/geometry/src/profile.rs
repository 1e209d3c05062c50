// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! 2D profiles in the local tangent frame

use crate::error::Result;
use crate::triangulation::triangulate_polygon;
use nalgebra::Point2;
use zonewise_core::{GeoPoint, LocalFrame};

/// Points closer than this (meters) are treated as duplicates
const DUPLICATE_EPSILON: f64 = 1e-6;

/// Open ring in local meters (x east, y north), counter-clockwise
#[derive(Debug, Clone, PartialEq)]
pub struct Profile2D {
    pub outer: Vec<Point2<f64>>,
}

/// Triangulated profile result
#[derive(Debug, Clone)]
pub struct Triangulation {
    pub points: Vec<Point2<f64>>,
    /// Flat triangle index list into `points`
    pub indices: Vec<usize>,
}

impl Profile2D {
    /// Wrap a ring, normalizing it to counter-clockwise
    pub fn new(outer: Vec<Point2<f64>>) -> Self {
        let mut profile = Self { outer };
        profile.ensure_ccw();
        profile
    }

    /// Project a geographic ring into `frame`, dropping the closing point and
    /// consecutive duplicates
    pub fn from_geo_ring(ring: &[GeoPoint], frame: &LocalFrame) -> Self {
        let mut outer: Vec<Point2<f64>> = Vec::with_capacity(ring.len());
        for p in ring {
            let (x, y) = frame.to_local(*p);
            let candidate = Point2::new(x, y);
            if outer
                .last()
                .map_or(true, |last| (last - candidate).norm() > DUPLICATE_EPSILON)
            {
                outer.push(candidate);
            }
        }
        while outer.len() > 1 {
            let closing = (outer[0] - outer[outer.len() - 1]).norm() <= DUPLICATE_EPSILON;
            if !closing {
                break;
            }
            outer.pop();
        }
        Self::new(outer)
    }

    /// Closed geographic ring (closing point appended)
    pub fn to_geo_ring(&self, frame: &LocalFrame) -> Vec<GeoPoint> {
        let mut ring: Vec<GeoPoint> = self.outer.iter().map(|p| frame.to_geo(p.x, p.y)).collect();
        if let Some(first) = ring.first().copied() {
            ring.push(first);
        }
        ring
    }

    /// Signed area; positive = counter-clockwise
    pub fn signed_area(&self) -> f64 {
        compute_signed_area(&self.outer)
    }

    /// Area in square meters
    #[inline]
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    pub fn ensure_ccw(&mut self) {
        if self.signed_area() < 0.0 {
            self.outer.reverse();
        }
    }

    /// Whether the ring has enough distinct points and area to be a polygon
    pub fn is_degenerate(&self, min_area: f64) -> bool {
        self.outer.len() < 3 || self.area() <= min_area
    }

    /// Triangulate the profile
    pub fn triangulate(&self) -> Result<Triangulation> {
        let indices = triangulate_polygon(&self.outer)?;
        Ok(Triangulation {
            points: self.outer.clone(),
            indices,
        })
    }
}

/// Signed shoelace area of an open ring
pub fn compute_signed_area(contour: &[Point2<f64>]) -> f64 {
    if contour.len() < 3 {
        return 0.0;
    }

    let n = contour.len();
    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += contour[i].x * contour[j].y;
        area -= contour[j].x * contour[i].y;
    }

    area * 0.5
}

/// Regular polygon approximating a circle around `center`
pub fn create_circle(center: Point2<f64>, radius: f64, segments: usize) -> Profile2D {
    let segments = segments.max(3);
    let outer = (0..segments)
        .map(|i| {
            let angle = 2.0 * std::f64::consts::PI * i as f64 / segments as f64;
            Point2::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
        })
        .collect();
    Profile2D::new(outer)
}

/// Axis-aligned rectangle centered on the origin
pub fn create_rectangle(width: f64, height: f64) -> Profile2D {
    let (hw, hh) = (width / 2.0, height / 2.0);
    Profile2D::new(vec![
        Point2::new(-hw, -hh),
        Point2::new(hw, -hh),
        Point2::new(hw, hh),
        Point2::new(-hw, hh),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_normalizes_to_ccw() {
        let cw = Profile2D::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 0.0),
        ]);
        assert!(cw.signed_area() > 0.0);
    }

    #[test]
    fn test_from_geo_ring_drops_closing_point() {
        let frame = LocalFrame::new(GeoPoint::new(0.0, 0.0));
        let ring = vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.001, 0.0),
            GeoPoint::new(0.001, 0.0),
            GeoPoint::new(0.001, 0.001),
            GeoPoint::new(0.0, 0.0),
        ];
        let profile = Profile2D::from_geo_ring(&ring, &frame);
        assert_eq!(profile.outer.len(), 3);
    }

    #[test]
    fn test_geo_round_trip() {
        let frame = LocalFrame::new(GeoPoint::new(-80.0, 28.0));
        let profile = create_rectangle(20.0, 10.0);
        let ring = profile.to_geo_ring(&frame);
        assert_eq!(ring.first(), ring.last());
        let back = Profile2D::from_geo_ring(&ring, &frame);
        assert_relative_eq!(back.area(), 200.0, epsilon = 1e-6);
    }

    #[test]
    fn test_circle_area_approaches_pi_r2() {
        let circle = create_circle(Point2::origin(), 1.0, 64);
        assert!((circle.area() - std::f64::consts::PI).abs() < 0.01);
        assert!(!circle.is_degenerate(1e-6));
    }
}

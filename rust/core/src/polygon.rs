// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Geographic polygon utilities
//!
//! Area, centroid, bounds, distance and bearing over closed WGS84 rings.
//! Areas are planar (shoelace) in the local tangent frame of the ring's
//! bounding-box center, which matches the frame the envelope engine works in.

use crate::error::{Result, ValidationError};
use crate::georef::{GeoPoint, LocalFrame};
use crate::units::{DistanceUnit, EARTH_RADIUS_M};

/// Minimum ring length: a triangle plus the closing point
pub const MIN_RING_POINTS: usize = 4;

/// Axis-aligned geographic bounds
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.min_lon + self.max_lon) * 0.5,
            (self.min_lat + self.max_lat) * 0.5,
        )
    }
}

/// A validated lot boundary: closed ring, at least 4 points, finite WGS84
/// coordinates. Convexity is not required.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct LotPolygon {
    ring: Vec<GeoPoint>,
}

impl LotPolygon {
    /// Validate and wrap a closed ring
    pub fn new(ring: Vec<GeoPoint>) -> Result<Self> {
        validate_ring(&ring)?;
        Ok(Self { ring })
    }

    /// The closed ring, closing point included
    #[inline]
    pub fn ring(&self) -> &[GeoPoint] {
        &self.ring
    }

    /// Ring vertices without the closing duplicate
    #[inline]
    pub fn vertices(&self) -> &[GeoPoint] {
        &self.ring[..self.ring.len() - 1]
    }

    pub fn area_sq_m(&self) -> f64 {
        area(&self.ring)
    }

    pub fn centroid(&self) -> GeoPoint {
        centroid(&self.ring)
    }

    pub fn bounding_box(&self) -> BoundingBox {
        // Validated rings are never empty
        bounding_box(&self.ring).unwrap_or(BoundingBox {
            min_lon: 0.0,
            min_lat: 0.0,
            max_lon: 0.0,
            max_lat: 0.0,
        })
    }

    /// True when no two non-adjacent edges cross
    pub fn is_simple(&self) -> bool {
        let frame = LocalFrame::new(self.bounding_box().center());
        let pts: Vec<(f64, f64)> = self.vertices().iter().map(|p| frame.to_local(*p)).collect();
        is_simple_ring(&pts)
    }

    /// Width and depth (meters) of the ring's bounding box in a local frame
    pub fn local_extent(&self, frame: &LocalFrame) -> (f64, f64) {
        let mut min = (f64::MAX, f64::MAX);
        let mut max = (f64::MIN, f64::MIN);
        for p in self.vertices() {
            let (x, y) = frame.to_local(*p);
            min = (min.0.min(x), min.1.min(y));
            max = (max.0.max(x), max.1.max(y));
        }
        (max.0 - min.0, max.1 - min.1)
    }
}

impl TryFrom<Vec<GeoPoint>> for LotPolygon {
    type Error = ValidationError;

    fn try_from(ring: Vec<GeoPoint>) -> Result<Self> {
        Self::new(ring)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for LotPolygon {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        let ring = Vec::<GeoPoint>::deserialize(d)?;
        LotPolygon::new(ring).map_err(serde::de::Error::custom)
    }
}

/// Check the ring invariants shared by lot and buildable polygons
pub fn validate_ring(ring: &[GeoPoint]) -> Result<()> {
    if ring.len() < MIN_RING_POINTS {
        return Err(ValidationError::TooFewPoints(ring.len()));
    }
    for (i, p) in ring.iter().enumerate() {
        if !p.is_finite() {
            return Err(ValidationError::NonFiniteCoordinate(i));
        }
        if !(-90.0..=90.0).contains(&p.lat) {
            return Err(ValidationError::LatitudeOutOfRange(p.lat));
        }
        if !(-180.0..=180.0).contains(&p.lon) {
            return Err(ValidationError::LongitudeOutOfRange(p.lon));
        }
    }
    if ring.first() != ring.last() {
        return Err(ValidationError::UnclosedRing);
    }
    Ok(())
}

/// Strip the closing point if the ring is closed
#[inline]
fn open_ring(ring: &[GeoPoint]) -> &[GeoPoint] {
    match (ring.first(), ring.last()) {
        (Some(a), Some(b)) if ring.len() > 1 && a == b => &ring[..ring.len() - 1],
        _ => ring,
    }
}

/// Signed shoelace area of an open ring of local points
/// Positive = counter-clockwise
pub fn signed_area_local(points: &[(f64, f64)]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let n = points.len();
    let mut acc = 0.0;
    for i in 0..n {
        let (x0, y0) = points[i];
        let (x1, y1) = points[(i + 1) % n];
        acc += x0 * y1 - x1 * y0;
    }
    acc * 0.5
}

/// Polygon area in square meters (always non-negative)
pub fn area(ring: &[GeoPoint]) -> f64 {
    let Some(bbox) = bounding_box(ring) else {
        return 0.0;
    };
    let frame = LocalFrame::new(bbox.center());
    let pts: Vec<(f64, f64)> = open_ring(ring).iter().map(|p| frame.to_local(*p)).collect();
    signed_area_local(&pts).abs()
}

/// Vertex-mean centroid of the ring (closing point excluded)
pub fn centroid(ring: &[GeoPoint]) -> GeoPoint {
    let pts = open_ring(ring);
    if pts.is_empty() {
        return GeoPoint::default();
    }
    let n = pts.len() as f64;
    let (lon, lat) = pts
        .iter()
        .fold((0.0, 0.0), |(lon, lat), p| (lon + p.lon, lat + p.lat));
    GeoPoint::new(lon / n, lat / n)
}

pub fn bounding_box(ring: &[GeoPoint]) -> Option<BoundingBox> {
    let first = ring.first()?;
    let init = BoundingBox {
        min_lon: first.lon,
        min_lat: first.lat,
        max_lon: first.lon,
        max_lat: first.lat,
    };
    Some(ring.iter().skip(1).fold(init, |b, p| BoundingBox {
        min_lon: b.min_lon.min(p.lon),
        min_lat: b.min_lat.min(p.lat),
        max_lon: b.max_lon.max(p.lon),
        max_lat: b.max_lat.max(p.lat),
    }))
}

/// Great-circle (haversine) distance between two points
pub fn distance(a: GeoPoint, b: GeoPoint, units: DistanceUnit) -> f64 {
    let (lat1, lat2) = (a.lat.to_radians(), b.lat.to_radians());
    let dlat = lat2 - lat1;
    let dlon = (b.lon - a.lon).to_radians();
    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let meters = 2.0 * EARTH_RADIUS_M * h.sqrt().min(1.0).asin();
    units.from_meters(meters)
}

/// Initial great-circle bearing from `a` to `b` in radians, in (-PI, PI],
/// 0 = North, clockwise positive
pub fn bearing(a: GeoPoint, b: GeoPoint) -> f64 {
    let (lat1, lat2) = (a.lat.to_radians(), b.lat.to_radians());
    let dlon = (b.lon - a.lon).to_radians();
    let y = dlon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();
    y.atan2(x)
}

/// Segment-crossing test over an open ring; adjacent edges may share endpoints
pub fn is_simple_ring(points: &[(f64, f64)]) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }
    for i in 0..n {
        let a0 = points[i];
        let a1 = points[(i + 1) % n];
        for j in (i + 1)..n {
            // Skip the edge itself and its neighbours
            if j == i || (j + 1) % n == i || (i + 1) % n == j {
                continue;
            }
            let b0 = points[j];
            let b1 = points[(j + 1) % n];
            if segments_intersect(a0, a1, b0, b1) {
                return false;
            }
        }
    }
    true
}

fn orient(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> f64 {
    (b.0 - a.0) * (c.1 - a.1) - (b.1 - a.1) * (c.0 - a.0)
}

fn on_segment(a: (f64, f64), b: (f64, f64), p: (f64, f64)) -> bool {
    p.0 >= a.0.min(b.0) && p.0 <= a.0.max(b.0) && p.1 >= a.1.min(b.1) && p.1 <= a.1.max(b.1)
}

fn segments_intersect(a0: (f64, f64), a1: (f64, f64), b0: (f64, f64), b1: (f64, f64)) -> bool {
    const EPS: f64 = 1e-12;
    let d1 = orient(b0, b1, a0);
    let d2 = orient(b0, b1, a1);
    let d3 = orient(a0, a1, b0);
    let d4 = orient(a0, a1, b1);

    if ((d1 > EPS && d2 < -EPS) || (d1 < -EPS && d2 > EPS))
        && ((d3 > EPS && d4 < -EPS) || (d3 < -EPS && d4 > EPS))
    {
        return true;
    }

    (d1.abs() <= EPS && on_segment(b0, b1, a0))
        || (d2.abs() <= EPS && on_segment(b0, b1, a1))
        || (d3.abs() <= EPS && on_segment(a0, a1, b0))
        || (d4.abs() <= EPS && on_segment(a0, a1, b1))
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Coordinate frames: geographic, local tangent plane and render space
//!
//! Three frames are in play:
//! - **Geographic**: WGS84 longitude/latitude in degrees.
//! - **Local**: meters East (`x`) and North (`y`) of a reference center,
//!   using an equirectangular approximation.
//! - **Render**: right-handed, Y-up, with +Z pointing south, i.e.
//!   `(x, altitude, -y)` of the local frame.
//!
//! The equirectangular approximation is only valid for extents under
//! [`MAX_LOCAL_EXTENT_M`] (~10 km) from the reference center. Callers that
//! need larger extents must use a proper projection instead.

/// Meters per degree of latitude (constant in this approximation)
pub const METERS_PER_DEGREE_LAT: f64 = 110_540.0;

/// Meters per degree of longitude at the equator
pub const METERS_PER_DEGREE_LON_EQUATOR: f64 = 111_320.0;

/// Largest distance from the reference center the local frame is valid for
pub const MAX_LOCAL_EXTENT_M: f64 = 10_000.0;

/// Geographic coordinate (WGS84 degrees)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.lon.is_finite() && self.lat.is_finite()
    }

    /// `[lon, lat]` pair, the GeoJSON position order
    #[inline]
    pub fn to_array(self) -> [f64; 2] {
        [self.lon, self.lat]
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((lon, lat): (f64, f64)) -> Self {
        Self { lon, lat }
    }
}

/// Meters spanned by one degree of longitude at the given latitude
#[inline]
pub fn meters_per_degree_lon(lat_deg: f64) -> f64 {
    METERS_PER_DEGREE_LON_EQUATOR * lat_deg.to_radians().cos()
}

/// Geographic to local meters `(x east, y north)`
#[inline]
pub fn geo_to_local(lon: f64, lat: f64, center_lon: f64, center_lat: f64) -> (f64, f64) {
    let x = (lon - center_lon) * meters_per_degree_lon(center_lat);
    let y = (lat - center_lat) * METERS_PER_DEGREE_LAT;
    (x, y)
}

/// Exact inverse of [`geo_to_local`]
#[inline]
pub fn local_to_geo(x: f64, y: f64, center_lon: f64, center_lat: f64) -> (f64, f64) {
    let lon = center_lon + x / meters_per_degree_lon(center_lat);
    let lat = center_lat + y / METERS_PER_DEGREE_LAT;
    (lon, lat)
}

/// Geographic + altitude to render space `(x, altitude, -y)`
#[inline]
pub fn geo_to_render(
    lon: f64,
    lat: f64,
    alt: f64,
    center_lon: f64,
    center_lat: f64,
) -> (f64, f64, f64) {
    let (x, y) = geo_to_local(lon, lat, center_lon, center_lat);
    (x, alt, -y)
}

/// Render space back to `(lon, lat, altitude)`
#[inline]
pub fn render_to_geo(
    x: f64,
    y: f64,
    z: f64,
    center_lon: f64,
    center_lat: f64,
) -> (f64, f64, f64) {
    let (lon, lat) = local_to_geo(x, -z, center_lon, center_lat);
    (lon, lat, y)
}

/// A local tangent frame anchored at a geographic reference center
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocalFrame {
    pub center: GeoPoint,
}

impl LocalFrame {
    pub fn new(center: GeoPoint) -> Self {
        Self { center }
    }

    #[inline]
    pub fn to_local(&self, p: GeoPoint) -> (f64, f64) {
        geo_to_local(p.lon, p.lat, self.center.lon, self.center.lat)
    }

    #[inline]
    pub fn to_geo(&self, x: f64, y: f64) -> GeoPoint {
        let (lon, lat) = local_to_geo(x, y, self.center.lon, self.center.lat);
        GeoPoint { lon, lat }
    }

    /// Point at altitude `alt` in render space: `(east, alt, south)`
    #[inline]
    pub fn to_render(&self, p: GeoPoint, alt: f64) -> (f64, f64, f64) {
        geo_to_render(p.lon, p.lat, alt, self.center.lon, self.center.lat)
    }

    #[inline]
    pub fn from_render(&self, x: f64, y: f64, z: f64) -> (GeoPoint, f64) {
        let (lon, lat, alt) = render_to_geo(x, y, z, self.center.lon, self.center.lat);
        (GeoPoint { lon, lat }, alt)
    }

    /// Whether a point lies inside the extent this approximation supports
    #[inline]
    pub fn is_within_valid_extent(&self, p: GeoPoint) -> bool {
        let (x, y) = self.to_local(p);
        x.hypot(y) <= MAX_LOCAL_EXTENT_M
    }
}

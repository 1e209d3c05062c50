// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use approx::assert_abs_diff_eq;
use zonewise_core::georef::{geo_to_local, geo_to_render, local_to_geo, render_to_geo};
use zonewise_core::{GeoPoint, LocalFrame, LotPolygon};

/// Offsets in degrees covering roughly ±5 km at mid latitudes
const OFFSETS: [(f64, f64); 6] = [
    (0.0, 0.0),
    (0.045, 0.0),
    (-0.045, 0.03),
    (0.02, -0.044),
    (-0.031, -0.031),
    (0.0001, 0.00007),
];

#[test]
fn local_round_trip_within_5km() {
    for &(clon, clat) in &[(-80.6, 28.1), (2.35, 48.85), (151.2, -33.87), (-122.42, 37.77)] {
        for &(dlon, dlat) in &OFFSETS {
            let (lon, lat) = (clon + dlon, clat + dlat);
            let (x, y) = geo_to_local(lon, lat, clon, clat);
            let (lon2, lat2) = local_to_geo(x, y, clon, clat);
            assert_abs_diff_eq!(lon2, lon, epsilon = 1e-6);
            assert_abs_diff_eq!(lat2, lat, epsilon = 1e-6);
        }
    }
}

#[test]
fn render_round_trip_keeps_altitude() {
    let (clon, clat) = (-80.6, 28.1);
    let (x, alt, z) = geo_to_render(-80.59, 28.11, 12.5, clon, clat);
    assert_abs_diff_eq!(alt, 12.5);
    // North of center maps to -Z
    assert!(z < 0.0);
    assert!(x > 0.0);

    let (lon, lat, alt2) = render_to_geo(x, alt, z, clon, clat);
    assert_abs_diff_eq!(lon, -80.59, epsilon = 1e-9);
    assert_abs_diff_eq!(lat, 28.11, epsilon = 1e-9);
    assert_abs_diff_eq!(alt2, 12.5);
}

#[test]
fn frame_render_point_carries_altitude_on_y() {
    let frame = LocalFrame::new(GeoPoint::new(-80.6, 28.1));
    let p = frame.to_geo(40.0, 25.0);

    let (x, y, z) = frame.to_render(p, 30.0);
    assert_abs_diff_eq!(x, 40.0, epsilon = 1e-6);
    assert_abs_diff_eq!(y, 30.0);
    assert_abs_diff_eq!(z, -25.0, epsilon = 1e-6);

    let (back, alt) = frame.from_render(x, y, z);
    assert_abs_diff_eq!(alt, 30.0);
    assert_abs_diff_eq!(back.lon, p.lon, epsilon = 1e-9);
    assert_abs_diff_eq!(back.lat, p.lat, epsilon = 1e-9);
}

#[test]
fn frame_flags_points_beyond_valid_extent() {
    let frame = LocalFrame::new(GeoPoint::new(-80.6, 28.1));
    assert!(frame.is_within_valid_extent(GeoPoint::new(-80.55, 28.12)));
    assert!(!frame.is_within_valid_extent(GeoPoint::new(-80.3, 28.1)));
}

#[test]
fn lot_metrics_agree_with_local_square() {
    let frame = LocalFrame::new(GeoPoint::new(-80.6, 28.1));
    let ring: Vec<GeoPoint> = [(0.0, 0.0), (50.0, 0.0), (50.0, 30.0), (0.0, 30.0), (0.0, 0.0)]
        .iter()
        .map(|&(x, y)| frame.to_geo(x, y))
        .collect();
    let lot = LotPolygon::new(ring).unwrap();

    assert_abs_diff_eq!(lot.area_sq_m(), 1500.0, epsilon = 0.05);
    let (w, d) = lot.local_extent(&frame);
    assert_abs_diff_eq!(w, 50.0, epsilon = 1e-6);
    assert_abs_diff_eq!(d, 30.0, epsilon = 1e-6);

    let (cx, cy) = frame.to_local(lot.centroid());
    assert_abs_diff_eq!(cx, 25.0, epsilon = 1e-6);
    assert_abs_diff_eq!(cy, 15.0, epsilon = 1e-6);
    assert!(lot.is_simple());
}

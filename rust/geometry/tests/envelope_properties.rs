// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end envelope checks on realistic lots.

use approx::assert_abs_diff_eq;
use std::f64::consts::TAU;
use zonewise_core::{feet_to_meters, meters_to_feet, sq_meters_to_sq_feet, GeoPoint, LocalFrame, LotPolygon, Setbacks, ZoningLimits};
use zonewise_geometry::{extrude, generate_envelope, to_obj, FLOOR_HEIGHT_FT};

const CENTER: GeoPoint = GeoPoint {
    lon: -80.6081,
    lat: 28.0836,
};

fn lot_from_local(points: &[(f64, f64)]) -> LotPolygon {
    let frame = LocalFrame::new(CENTER);
    let mut ring: Vec<GeoPoint> = points.iter().map(|&(x, y)| frame.to_geo(x, y)).collect();
    ring.push(ring[0]);
    LotPolygon::new(ring).unwrap()
}

fn square_lot_ft(side_ft: f64) -> LotPolygon {
    let h = feet_to_meters(side_ft) / 2.0;
    lot_from_local(&[(-h, -h), (h, -h), (h, h), (-h, h)])
}

fn regular_lot(n: usize, radius_m: f64) -> LotPolygon {
    let points: Vec<(f64, f64)> = (0..n)
        .map(|i| {
            let a = TAU * i as f64 / n as f64;
            (radius_m * a.cos(), radius_m * a.sin())
        })
        .collect();
    lot_from_local(&points)
}

fn l_shaped_lot() -> LotPolygon {
    lot_from_local(&[
        (0.0, 0.0),
        (60.0, 0.0),
        (60.0, 25.0),
        (25.0, 25.0),
        (25.0, 60.0),
        (0.0, 60.0),
    ])
}

fn limits(height: f64, far: f64, setbacks: Setbacks) -> ZoningLimits {
    ZoningLimits {
        district_code: "RS-1".into(),
        district_name: "Single-Family Residential".into(),
        min_lot_area_sq_ft: 7_500.0,
        min_lot_width_ft: 75.0,
        max_height_ft: height,
        max_far: far,
        setbacks,
        provenance: None,
    }
}

#[test]
fn one_acre_lot_scenario() {
    let lot = square_lot_ft(208.71);
    let result =
        generate_envelope(&lot, &limits(35.0, 0.30, Setbacks::new(35.0, 15.0, 25.0))).unwrap();

    assert_eq!(result.max_floors, 3);
    assert!((result.lot_area_sq_ft as i64 - 43_560).abs() <= 1);
    assert!((result.max_gfa_sq_ft as i64 - 13_068).abs() <= 1);
    assert!(result.max_buildable_area_sq_ft > 0);
    assert!(result.max_buildable_area_sq_ft < result.lot_area_sq_ft);
    assert!(!result.setback_degenerate);

    // Uniform 22.5 ft inset leaves a 163.71 ft square
    assert_abs_diff_eq!(result.inset_distance_ft, 22.5, epsilon = 1e-9);
    assert!((result.max_buildable_area_sq_ft as f64 - 163.71 * 163.71).abs() < 30.0);
    assert!(result.compliance.meets_min_lot_area);
    assert!(result.compliance.meets_min_lot_width);
}

#[test]
fn buildable_never_exceeds_lot() {
    let lots = [square_lot_ft(100.0), regular_lot(7, 30.0), l_shaped_lot()];
    let setbacks = [
        Setbacks::default(),
        Setbacks::new(5.0, 5.0, 5.0),
        Setbacks::new(25.0, 10.0, 20.0),
        Setbacks::new(40.0, 20.0, 40.0),
    ];
    for lot in &lots {
        for s in &setbacks {
            let result = generate_envelope(lot, &limits(40.0, 0.5, *s)).unwrap();
            assert!(
                result.max_buildable_area_sq_ft <= result.lot_area_sq_ft,
                "{:?}: {} > {}",
                s,
                result.max_buildable_area_sq_ft,
                result.lot_area_sq_ft
            );
            if s.weighted_average_ft() > 0.0 {
                assert!(result.max_buildable_area_sq_ft < result.lot_area_sq_ft);
            } else {
                assert_eq!(result.max_buildable_area_sq_ft, result.lot_area_sq_ft);
            }
        }
    }
}

/// 40 x 40 m body reached through a 6 m wide panhandle
fn flag_lot_local() -> Vec<(f64, f64)> {
    vec![
        (0.0, 0.0),
        (40.0, 0.0),
        (40.0, 40.0),
        (23.0, 40.0),
        (23.0, 60.0),
        (17.0, 60.0),
        (17.0, 40.0),
        (0.0, 40.0),
    ]
}

fn distance_to_boundary(ring: &[(f64, f64)], (px, py): (f64, f64)) -> f64 {
    (0..ring.len())
        .map(|i| {
            let (ax, ay) = ring[i];
            let (bx, by) = ring[(i + 1) % ring.len()];
            let (dx, dy) = (bx - ax, by - ay);
            let t = (((px - ax) * dx + (py - ay) * dy) / (dx * dx + dy * dy)).clamp(0.0, 1.0);
            ((px - ax - t * dx).powi(2) + (py - ay - t * dy).powi(2)).sqrt()
        })
        .fold(f64::INFINITY, f64::min)
}

#[test]
fn flag_lot_setback_line_clears_the_panhandle() {
    let local = flag_lot_local();
    let lot = lot_from_local(&local);
    let frame = LocalFrame::new(CENTER);

    for (inset_m, expected_sq_m) in [(4.0, 32.0 * 32.0), (8.0, 24.0 * 24.0)] {
        let ft = meters_to_feet(inset_m);
        let result = generate_envelope(&lot, &limits(35.0, 1.0, Setbacks::new(ft, ft, ft))).unwrap();
        assert!(!result.setback_degenerate);

        let expected = sq_meters_to_sq_feet(expected_sq_m);
        assert!(
            (result.max_buildable_area_sq_ft as f64 - expected).abs() < 10.0,
            "inset {inset_m}: {} vs {expected}",
            result.max_buildable_area_sq_ft
        );
        for p in &result.buildable_area {
            let d = distance_to_boundary(&local, frame.to_local(*p));
            assert!(d >= inset_m - 0.05, "inset {inset_m}: vertex {d} m from the lot line");
        }
    }
}

#[test]
fn gfa_is_linear_in_far() {
    let lot = l_shaped_lot();
    for far in [0.1, 0.3, 0.75, 1.0, 2.5, 6.0] {
        let result = generate_envelope(&lot, &limits(40.0, far, Setbacks::default())).unwrap();
        let expected = result.lot_area_sq_ft as f64 * far;
        // Lot area was rounded before scaling here
        assert!(
            (result.max_gfa_sq_ft as f64 - expected).abs() <= far / 2.0 + 1.0,
            "far {far}"
        );
    }
}

#[test]
fn floors_follow_fixed_storey_height() {
    let lot = square_lot_ft(120.0);
    for height in [8.0, 10.0, 25.0, 35.0, 45.0, 120.0] {
        let result = generate_envelope(&lot, &limits(height, 1.0, Setbacks::default())).unwrap();
        assert_eq!(result.max_floors, (height / FLOOR_HEIGHT_FT).floor() as u32);
    }
}

#[test]
fn volume_is_area_times_height() {
    let lot = regular_lot(9, 35.0);
    for height in [12.0, 35.0, 85.0] {
        let result =
            generate_envelope(&lot, &limits(height, 1.0, Setbacks::new(20.0, 8.0, 15.0))).unwrap();
        let expected = result.max_buildable_area_sq_ft as f64 * height;
        assert!((result.envelope_volume_cu_ft as f64 - expected).abs() <= height / 2.0 + 1.0);

        // The solid agrees with the reported volume
        let solid_cu_ft = result.solid_geometry.volume() / feet_to_meters(1.0).powi(3);
        assert!((solid_cu_ft - result.envelope_volume_cu_ft as f64).abs() / solid_cu_ft < 1e-3);
    }
}

#[test]
fn oversized_setbacks_degrade_gracefully() {
    let lot = lot_from_local(&[(-5.0, -5.0), (5.0, -5.0), (5.0, 5.0), (-5.0, 5.0)]);
    let result =
        generate_envelope(&lot, &limits(30.0, 1.0, Setbacks::new(50.0, 50.0, 50.0))).unwrap();

    assert!(result.setback_degenerate);
    assert!(result.max_buildable_area_sq_ft < result.lot_area_sq_ft);
    assert!(result.max_buildable_area_sq_ft < 40);
    assert!(!result.solid_geometry.is_empty());
    assert_eq!(result.buildable_area.first(), result.buildable_area.last());
}

#[test]
fn convex_extrusion_triangle_counts() {
    for n in [3usize, 4, 5, 8] {
        let lot = regular_lot(n, 20.0);
        let solid = extrude(lot.ring(), 30.0, CENTER).unwrap();
        assert_eq!(solid.positions.len(), solid.normals.len());
        assert_eq!(solid.positions.len() % 9, 0);
        assert_eq!(solid.triangle_count(), 2 * (n - 2) + 2 * n, "n = {n}");
    }
}

#[test]
fn non_convex_extrusion_is_closed() {
    let lot = l_shaped_lot();
    let solid = extrude(lot.ring(), 20.0, CENTER).unwrap();
    // 6 vertices: 4 + 4 cap triangles, 12 wall triangles
    assert_eq!(solid.triangle_count(), 20);

    let footprint_m2 = 60.0 * 25.0 + 25.0 * 35.0;
    let expected = footprint_m2 * feet_to_meters(20.0);
    assert!((solid.volume() - expected).abs() / expected < 1e-4);
}

#[test]
fn obj_export_lists_every_vertex() {
    let result =
        generate_envelope(&square_lot_ft(100.0), &limits(30.0, 1.0, Setbacks::default())).unwrap();
    let obj = to_obj(&result.solid_geometry, "envelope");
    let vertices = obj.lines().filter(|l| l.starts_with("v ")).count();
    let faces = obj.lines().filter(|l| l.starts_with("f ")).count();
    assert_eq!(vertices, result.solid_geometry.vertex_count());
    assert_eq!(faces, result.solid_geometry.triangle_count());
}

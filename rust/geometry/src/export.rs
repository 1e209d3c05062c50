// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Serializable views of envelope results for export collaborators
//!
//! Nothing here touches the filesystem; callers write the returned values.

use crate::envelope::EnvelopeResult;
use crate::solid::Solid;
use serde_json::{json, Value};
use zonewise_core::{GeoPoint, LotPolygon, ZoningLimits};

fn ring_coordinates(ring: &[GeoPoint]) -> Vec<[f64; 2]> {
    ring.iter().map(|p| p.to_array()).collect()
}

/// GeoJSON FeatureCollection with the lot and buildable-area polygons
pub fn to_geojson(lot: &LotPolygon, limits: &ZoningLimits, envelope: &EnvelopeResult) -> Value {
    json!({
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [ring_coordinates(lot.ring())],
                },
                "properties": {
                    "role": "lot",
                    "districtCode": limits.district_code,
                    "districtName": limits.district_name,
                    "lotAreaSqFt": envelope.lot_area_sq_ft,
                },
            },
            {
                "type": "Feature",
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [ring_coordinates(&envelope.buildable_area)],
                },
                "properties": {
                    "role": "buildable",
                    "maxBuildableAreaSqFt": envelope.max_buildable_area_sq_ft,
                    "maxGfaSqFt": envelope.max_gfa_sq_ft,
                    "envelopeVolumeCuFt": envelope.envelope_volume_cu_ft,
                    "maxFloors": envelope.max_floors,
                    "maxHeightFt": limits.max_height_ft,
                    "setbackDegenerate": envelope.setback_degenerate,
                },
            },
        ],
    })
}

/// Full JSON report: inputs and the envelope result
pub fn to_json(
    lot: &LotPolygon,
    limits: &ZoningLimits,
    envelope: &EnvelopeResult,
) -> serde_json::Result<Value> {
    Ok(json!({
        "lot": serde_json::to_value(lot)?,
        "zoning": serde_json::to_value(limits)?,
        "envelope": serde_json::to_value(envelope)?,
    }))
}

/// Wavefront OBJ text (vertex + normal + face lists) for a solid
pub fn to_obj(solid: &Solid, name: &str) -> String {
    let mut out = String::with_capacity(solid.positions.len() * 12);
    out.push_str(&format!("o {}\n", name));
    for p in solid.positions.chunks_exact(3) {
        out.push_str(&format!("v {} {} {}\n", p[0], p[1], p[2]));
    }
    for n in solid.normals.chunks_exact(3) {
        out.push_str(&format!("vn {} {} {}\n", n[0], n[1], n[2]));
    }
    // OBJ indices are 1-based; vertex i pairs with normal i
    for t in 0..solid.triangle_count() {
        let i = t * 3 + 1;
        out.push_str(&format!("f {0}//{0} {1}//{1} {2}//{2}\n", i, i + 1, i + 2));
    }
    out
}

//! ZoneWise Geometry Processing
//!
//! Buildable-envelope geometry: uniform setback inset with i_overlay
//! cleanup, earcutr triangulation, and extrusion to closed render-space
//! solids using nalgebra.

pub mod envelope;
pub mod error;
pub mod export;
pub mod extrusion;
pub mod profile;
pub mod setback;
pub mod solid;
pub mod triangulation;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector2, Vector3};

pub use envelope::{generate_envelope, EnvelopeResult, FLOOR_HEIGHT_FT};
pub use error::{Error, GeometryStage, Result};
pub use export::{to_geojson, to_json, to_obj};
pub use extrusion::{extrude, extrude_profile};
pub use profile::{Profile2D, Triangulation};
pub use setback::{apply_setbacks, inset_profile, BuildableArea, FALLBACK_RADIUS_M};
pub use solid::Solid;
pub use triangulation::triangulate_polygon;

//! Data models for polymap
//!
//! Value types persisted by the store and consumed by the drawing session:
//! - [`Coordinate`]: a validated latitude/longitude pair
//! - [`PolygonRecord`]: the sole persisted entity
//! - [`Color`]: fill/stroke color with the preset palette
//! - [`PolygonDraft`]: the save form, validated before a record is stored

mod color;
mod coordinate;
mod draft;
mod polygon;

pub use color::{Color, PresetColor, PRESET_COLORS};
pub use coordinate::Coordinate;
pub use draft::{validate_label, validate_name, PolygonDraft};
pub use polygon::{PolygonId, PolygonRecord, MIN_POLYGON_VERTICES};

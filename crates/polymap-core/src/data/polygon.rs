use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Color, Coordinate};

/// Fewest vertices that close a polygon.
pub const MIN_POLYGON_VERTICES: usize = 3;

/// Identity of a polygon record.
///
/// Generated from a time-ordered UUID, so ids are unique within a session
/// and sort by creation time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PolygonId(String);

impl PolygonId {
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Creation time encoded in a generated id.
    ///
    /// `None` for ids that are not time-ordered UUIDs, such as imported ones.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        let (secs, nanos) = Uuid::parse_str(&self.0).ok()?.get_timestamp()?.to_unix();
        DateTime::from_timestamp(i64::try_from(secs).ok()?, nanos)
    }
}

impl std::fmt::Display for PolygonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PolygonId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for PolygonId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A persisted, labelled polygon.
///
/// Records saved by older builds may lack `id`, `price`, or `color`; those
/// fields fall back to a fresh id, zero, and the default preset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonRecord {
    #[serde(default = "PolygonId::generate")]
    pub id: PolygonId,
    pub name: String,
    #[serde(default)]
    pub price: f64,
    pub coordinates: Vec<Coordinate>,
    #[serde(default)]
    pub color: Color,
}

impl PolygonRecord {
    /// Creates a record with a freshly generated id.
    pub fn new(
        name: impl Into<String>,
        price: f64,
        coordinates: Vec<Coordinate>,
        color: Color,
    ) -> Self {
        Self {
            id: PolygonId::generate(),
            name: name.into(),
            price,
            coordinates,
            color,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.coordinates.len()
    }

    /// Whether the record can be drawn as a closed shape.
    pub fn is_closed_shape(&self) -> bool {
        self.coordinates.len() >= MIN_POLYGON_VERTICES
    }
}

//! Durable storage layout of the polygon collection.
//!
//! The whole collection is stored as one JSON document under a single key:
//!
//! ```json
//! { "state": { "polygons": [ ... ] }, "version": 0 }
//! ```
//!
//! The document is always written and read as a unit, so insertion order
//! round-trips and the last writer wins.

use polymap_core::{Color, Coordinate, PolygonId, PolygonRecord};
use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// Current layout version.
pub const STORAGE_FORMAT_VERSION: u32 = 0;

/// Key the collection is stored under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "polygon-storage";

/// Persisted document wrapping the collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredDocument {
    pub state: StoredState,
    #[serde(default)]
    pub version: u32,
}

/// Persisted store state.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StoredState {
    #[serde(default)]
    pub polygons: Vec<PolygonRecord>,
}

#[derive(Serialize)]
struct DocumentRef<'a> {
    state: StateRef<'a>,
    version: u32,
}

#[derive(Serialize)]
struct StateRef<'a> {
    polygons: &'a [PolygonRecord],
}

/// A record as read back from storage, where `id` may be missing.
#[derive(Deserialize)]
struct StoredRecord {
    #[serde(default)]
    id: Option<PolygonId>,
    name: String,
    #[serde(default)]
    price: f64,
    coordinates: Vec<Coordinate>,
    #[serde(default)]
    color: Color,
}

#[derive(Deserialize)]
struct StoredDocumentIn {
    #[serde(default)]
    state: StoredStateIn,
    #[serde(default)]
    version: u32,
}

#[derive(Default, Deserialize)]
struct StoredStateIn {
    #[serde(default)]
    polygons: Vec<StoredRecord>,
}

/// Collection decoded from storage.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedCollection {
    pub polygons: Vec<PolygonRecord>,
    /// Records stored without an id that were given a fresh one. The
    /// collection must be written back for those ids to survive a reload.
    pub assigned_ids: usize,
}

/// Import payloads: a full stored document or a bare array of records.
#[derive(Deserialize)]
#[serde(untagged)]
enum ImportPayload {
    Document(StoredDocument),
    Records(Vec<PolygonRecord>),
}

impl StoredDocument {
    pub fn new(polygons: Vec<PolygonRecord>) -> Self {
        Self {
            state: StoredState { polygons },
            version: STORAGE_FORMAT_VERSION,
        }
    }

    /// Serializes a collection without cloning it.
    pub fn encode(polygons: &[PolygonRecord]) -> StoreResult<String> {
        let doc = DocumentRef {
            state: StateRef { polygons },
            version: STORAGE_FORMAT_VERSION,
        };
        Ok(serde_json::to_string(&doc)?)
    }

    /// Decodes the document stored under `key`.
    ///
    /// Records without an id get a generated one, counted in
    /// [`LoadedCollection::assigned_ids`].
    pub fn decode(key: &str, text: &str) -> StoreResult<LoadedCollection> {
        let doc: StoredDocumentIn =
            serde_json::from_str(text).map_err(|e| StoreError::Corrupted {
                key: key.to_string(),
                reason: e.to_string(),
            })?;
        check_version(doc.version)?;

        let mut assigned_ids = 0;
        let polygons = doc
            .state
            .polygons
            .into_iter()
            .map(|stored| {
                let id = stored.id.unwrap_or_else(|| {
                    assigned_ids += 1;
                    PolygonId::generate()
                });
                PolygonRecord {
                    id,
                    name: stored.name,
                    price: stored.price,
                    coordinates: stored.coordinates,
                    color: stored.color,
                }
            })
            .collect();

        Ok(LoadedCollection {
            polygons,
            assigned_ids,
        })
    }

    /// Decodes an import file read from `source`, accepting a document or a
    /// bare record array.
    pub fn decode_import(source: &str, text: &str) -> StoreResult<Vec<PolygonRecord>> {
        let payload = serde_json::from_str(text).map_err(|e| StoreError::InvalidImport {
            source_name: source.to_string(),
            reason: e.to_string(),
        })?;
        match payload {
            ImportPayload::Document(doc) => {
                check_version(doc.version)?;
                Ok(doc.state.polygons)
            }
            ImportPayload::Records(records) => Ok(records),
        }
    }
}

fn check_version(version: u32) -> StoreResult<()> {
    if version > STORAGE_FORMAT_VERSION {
        return Err(StoreError::UnsupportedVersion {
            found: version,
            supported: STORAGE_FORMAT_VERSION,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> PolygonRecord {
        PolygonRecord::new(
            name,
            10.0,
            vec![
                Coordinate::new(0.0, 0.0).unwrap(),
                Coordinate::new(0.0, 1.0).unwrap(),
                Coordinate::new(1.0, 1.0).unwrap(),
            ],
            Color::default(),
        )
    }

    #[test]
    fn test_encode_shape() {
        let text = StoredDocument::encode(&[record("a")]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["version"], 0);
        assert_eq!(value["state"]["polygons"][0]["name"], "a");
    }

    #[test]
    fn test_decode_preserves_order() {
        let records = vec![record("c"), record("a"), record("b")];
        let text = StoredDocument::encode(&records).unwrap();
        let loaded = StoredDocument::decode("k", &text).unwrap();
        assert_eq!(loaded.polygons, records);
        assert_eq!(loaded.assigned_ids, 0);
    }

    #[test]
    fn test_decode_corrupted() {
        let err = StoredDocument::decode("polygon-storage", "{not json").unwrap_err();
        assert!(matches!(err, StoreError::Corrupted { key, .. } if key == "polygon-storage"));
    }

    #[test]
    fn test_decode_future_version() {
        let text = r#"{"state":{"polygons":[]},"version":4}"#;
        assert!(matches!(
            StoredDocument::decode("k", text),
            Err(StoreError::UnsupportedVersion { found: 4, .. })
        ));
    }

    #[test]
    fn test_decode_import_accepts_bare_array() {
        let text = r#"[{"name":"Lot 1","price":5,"coordinates":[]}]"#;
        let records = StoredDocument::decode_import("lots.json", text).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].price, 5.0);

        let doc = StoredDocument::encode(&[record("x")]).unwrap();
        assert_eq!(
            StoredDocument::decode_import("lots.json", &doc).unwrap()[0].name,
            "x"
        );
    }

    #[test]
    fn test_decode_import_invalid_names_source() {
        let err = StoredDocument::decode_import("lots.json", "{\"state\":").unwrap_err();
        assert!(
            matches!(&err, StoreError::InvalidImport { source_name, .. } if source_name == "lots.json")
        );
        assert!(err.to_string().starts_with("Invalid import file 'lots.json'"));
    }

    #[test]
    fn test_decode_assigns_missing_ids() {
        let text = r#"{"state":{"polygons":[
            {"name":"Old","price":5,"coordinates":[]},
            {"id":"kept","name":"New","price":6,"coordinates":[]}
        ]},"version":0}"#;
        let loaded = StoredDocument::decode("k", text).unwrap();
        assert_eq!(loaded.assigned_ids, 1);
        assert!(!loaded.polygons[0].id.as_str().is_empty());
        assert_eq!(loaded.polygons[1].id, PolygonId::from("kept"));
        assert_eq!(loaded.polygons[0].color, Color::default());
    }
}

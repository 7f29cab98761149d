use polymap_core::{Color, Coordinate, PolygonRecord, StoreEvent};
use polymap_store::{FileStorage, MemoryStorage, PolygonStore, StorageBackend, StoredDocument};
use proptest::prelude::*;
use std::sync::{Arc, Mutex};

fn record(name: &str, price: f64) -> PolygonRecord {
    PolygonRecord::new(
        name,
        price,
        vec![
            Coordinate::new(48.85, 2.35).unwrap(),
            Coordinate::new(48.86, 2.35).unwrap(),
            Coordinate::new(48.86, 2.36).unwrap(),
        ],
        Color::default(),
    )
}

fn records_strategy() -> impl Strategy<Value = Vec<PolygonRecord>> {
    prop::collection::vec(("[a-c]{1,2}", 1u32..10_000), 0..12).prop_map(|items| {
        items
            .into_iter()
            .map(|(name, price)| record(&name, price as f64))
            .collect()
    })
}

proptest! {
    #[test]
    fn replace_then_save_appends_last(initial in records_strategy(), extra in "[a-z]{1,8}") {
        let store = PolygonStore::in_memory();
        store.replace_all(initial.clone());
        let added = record(&extra, 10.0);
        store.save(added.clone());

        let mut expected = initial;
        expected.push(added);
        prop_assert_eq!(store.polygons(), expected);
    }

    #[test]
    fn delete_by_name_filters_in_order(initial in records_strategy(), target in "[a-c]{1,2}") {
        let store = PolygonStore::in_memory();
        store.replace_all(initial.clone());
        let removed = store.delete_by_name(&record(&target, 1.0));

        let expected: Vec<_> = initial.iter().filter(|p| p.name != target).cloned().collect();
        prop_assert_eq!(removed, initial.len() - expected.len());
        prop_assert_eq!(store.polygons(), expected);
    }

    #[test]
    fn clear_all_always_empties(initial in records_strategy()) {
        let store = PolygonStore::in_memory();
        store.replace_all(initial);
        store.clear_all();
        prop_assert!(store.polygons().is_empty());
    }

    #[test]
    fn reload_round_trips(initial in records_strategy()) {
        let backend = Arc::new(MemoryStorage::new());
        let store = PolygonStore::open(backend.clone(), "polygon-storage").unwrap();
        store.replace_all(initial.clone());

        let reopened = PolygonStore::open(backend, "polygon-storage").unwrap();
        prop_assert_eq!(reopened.polygons(), initial);
    }
}

#[test]
fn test_file_backend_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let first = record("North", 1500.0);
    let second = record("South", 20.0);

    {
        let store =
            PolygonStore::open(Arc::new(FileStorage::new(dir.path())), "polygon-storage").unwrap();
        store.save(first.clone());
        store.save(second.clone());
        store.save(record("Gone", 5.0));
        store.delete_by_name(&record("Gone", 0.0));
    }

    let store =
        PolygonStore::open(Arc::new(FileStorage::new(dir.path())), "polygon-storage").unwrap();
    assert_eq!(store.polygons(), vec![first, second]);
}

#[test]
fn test_persisted_layout_matches_document_format() {
    let dir = tempfile::tempdir().unwrap();
    let backend = Arc::new(FileStorage::new(dir.path()));
    let store = PolygonStore::open(backend.clone(), "polygon-storage").unwrap();
    store.save(record("Lot", 99.0));

    let raw = std::fs::read_to_string(dir.path().join("polygon-storage.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["version"], 0);
    let polygon = &value["state"]["polygons"][0];
    assert_eq!(polygon["name"], "Lot");
    assert_eq!(polygon["price"], 99.0);
    assert_eq!(polygon["color"], "#87CEEB");
    assert_eq!(polygon["coordinates"][0]["lat"], 48.85);
    assert_eq!(polygon["coordinates"][0]["lng"], 2.35);
}

#[test]
fn test_legacy_records_load_with_defaults() {
    let backend = Arc::new(MemoryStorage::new());
    backend
        .write(
            "polygon-storage",
            r#"{"state":{"polygons":[{"name":"Old","coordinates":[{"lat":1.0,"lng":2.0}]}]},"version":0}"#,
        )
        .unwrap();

    let store = PolygonStore::open(backend.clone(), "polygon-storage").unwrap();
    let polygons = store.polygons();
    assert_eq!(polygons.len(), 1);
    assert_eq!(polygons[0].price, 0.0);
    assert_eq!(polygons[0].color, Color::default());
    assert!(!polygons[0].id.as_str().is_empty());

    let reopened = PolygonStore::open(backend, "polygon-storage").unwrap();
    assert_eq!(reopened.polygons(), polygons);
}

#[test]
fn test_corrupted_storage_fails_open() {
    let backend = Arc::new(MemoryStorage::new());
    backend.write("polygon-storage", "not json").unwrap();
    assert!(PolygonStore::open(backend, "polygon-storage").is_err());
}

#[test]
fn test_quota_failure_is_not_surfaced() {
    let store = PolygonStore::open(Arc::new(MemoryStorage::with_quota(8)), "polygon-storage")
        .unwrap();
    store.save(record("A", 1.0));
    store.clear_all();

    assert!(store.is_empty());
    assert_eq!(store.persist_failures(), 2);
}

#[test]
fn test_subscriber_sees_collection_after_each_mutation() {
    let store = Arc::new(PolygonStore::in_memory());
    let lengths = Arc::new(Mutex::new(Vec::new()));

    let (sink, reader) = (lengths.clone(), Arc::downgrade(&store));
    let id = store.subscribe(move |event: &StoreEvent| {
        if let Some(store) = reader.upgrade() {
            sink.lock().unwrap().push((event.revision(), store.len()));
        }
    });

    let a = record("A", 1.0);
    store.save(a.clone());
    store.save(record("B", 2.0));
    store.delete_by_id(&a.id);
    assert!(store.unsubscribe(id));
    store.clear_all();

    assert_eq!(*lengths.lock().unwrap(), vec![(1, 1), (2, 2), (3, 1)]);
}

#[test]
fn test_import_payload_replaces_collection() {
    let store = PolygonStore::in_memory();
    store.save(record("Existing", 1.0));

    let exported = StoredDocument::encode(&[record("X", 2.0), record("Y", 3.0)]).unwrap();
    let imported = StoredDocument::decode_import("export.json", &exported).unwrap();
    store.replace_all(imported);

    let names: Vec<_> = store.polygons().into_iter().map(|p| p.name).collect();
    assert_eq!(names, vec!["X", "Y"]);
}

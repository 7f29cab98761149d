//! Polygon Store
//!
//! The single source of truth for saved polygons. Every mutation writes the
//! whole collection to durable storage before returning and then notifies
//! subscribers through the event bus.
//!
//! Persistence is best-effort: a failed write is logged and counted, the
//! in-memory collection keeps the new value, and the caller sees no error.

use parking_lot::RwLock;
use polymap_core::{
    AppEvent, EventBus, EventBusError, EventCategory, EventFilter, PolygonId, PolygonRecord,
    StoreEvent, SubscriptionId,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::error::{StoreError, StoreResult};
use crate::layout::{LoadedCollection, StoredDocument, DEFAULT_STORAGE_KEY};
use crate::storage::{MemoryStorage, StorageBackend};

/// Persisted, observable, ordered collection of polygon records.
pub struct PolygonStore {
    key: String,
    backend: Arc<dyn StorageBackend>,
    bus: Arc<EventBus>,
    polygons: RwLock<Vec<PolygonRecord>>,
    revision: AtomicU64,
    persist_failures: AtomicU64,
}

impl PolygonStore {
    /// Opens the collection stored under `key`, starting empty when nothing
    /// has been stored yet.
    pub fn open(backend: Arc<dyn StorageBackend>, key: impl Into<String>) -> StoreResult<Self> {
        Self::open_with_bus(backend, key, Arc::new(EventBus::new()))
    }

    /// Opens the store publishing on an existing event bus.
    pub fn open_with_bus(
        backend: Arc<dyn StorageBackend>,
        key: impl Into<String>,
        bus: Arc<EventBus>,
    ) -> StoreResult<Self> {
        let key = key.into();
        let loaded = load(backend.as_ref(), &key)?;
        tracing::info!(
            "Opened polygon store '{}' on {} with {} polygons",
            key,
            backend.describe(),
            loaded.polygons.len()
        );

        let store = Self {
            key,
            backend,
            bus,
            polygons: RwLock::new(loaded.polygons),
            revision: AtomicU64::new(0),
            persist_failures: AtomicU64::new(0),
        };
        if loaded.assigned_ids > 0 {
            store.persist_assigned_ids(&store.polygons.read(), loaded.assigned_ids);
        }
        Ok(store)
    }

    /// Empty store backed by process memory.
    pub fn in_memory() -> Self {
        Self {
            key: DEFAULT_STORAGE_KEY.to_string(),
            backend: Arc::new(MemoryStorage::new()),
            bus: Arc::new(EventBus::new()),
            polygons: RwLock::new(Vec::new()),
            revision: AtomicU64::new(0),
            persist_failures: AtomicU64::new(0),
        }
    }

    /// Appends a record. Duplicate ids or names are not checked.
    pub fn save(&self, record: PolygonRecord) {
        let id = record.id.clone();
        let name = record.name.clone();
        let revision = self.commit(|polygons| polygons.push(record));
        self.notify(StoreEvent::Saved { revision, id, name });
    }

    /// Empties the collection.
    pub fn clear_all(&self) {
        let mut removed = 0;
        let revision = self.commit(|polygons| {
            removed = polygons.len();
            polygons.clear();
        });
        self.notify(StoreEvent::Cleared { revision, removed });
    }

    /// Replaces the collection with `polygons`, keeping their order.
    pub fn replace_all(&self, polygons: Vec<PolygonRecord>) {
        let count = polygons.len();
        let revision = self.commit(|current| *current = polygons);
        self.notify(StoreEvent::Replaced { revision, count });
    }

    /// Removes every record named like `record`, returning how many went.
    ///
    /// Records sharing the name are removed too, whatever their id. Prefer
    /// [`PolygonStore::delete_by_id`] when a single record is meant.
    pub fn delete_by_name(&self, record: &PolygonRecord) -> usize {
        let name = record.name.as_str();
        let (revision, removed) = self.remove_where(|p| p.name == name);
        if removed > 0 {
            self.notify(StoreEvent::Deleted {
                revision,
                key: name.to_string(),
                removed,
            });
        }
        removed
    }

    /// Removes the record with `id`. Returns false when no record matched.
    pub fn delete_by_id(&self, id: &PolygonId) -> bool {
        let (revision, removed) = self.remove_where(|p| &p.id == id);
        if removed > 0 {
            self.notify(StoreEvent::Deleted {
                revision,
                key: id.to_string(),
                removed,
            });
        }
        removed > 0
    }

    /// Applies `f` to the record with `id` and replaces the collection.
    ///
    /// Returns false, leaving the store untouched, when `id` is unknown.
    pub fn update<F>(&self, id: &PolygonId, f: F) -> bool
    where
        F: FnOnce(&mut PolygonRecord),
    {
        let mut polygons = self.polygons();
        let Some(record) = polygons.iter_mut().find(|p| &p.id == id) else {
            tracing::warn!("Cannot update unknown polygon {}", id);
            return false;
        };
        f(record);
        self.replace_all(polygons);
        true
    }

    /// Snapshot of the collection in insertion order.
    pub fn polygons(&self) -> Vec<PolygonRecord> {
        self.polygons.read().clone()
    }

    pub fn get(&self, id: &PolygonId) -> Option<PolygonRecord> {
        self.polygons.read().iter().find(|p| &p.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.polygons.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.read().is_empty()
    }

    /// Number of committed mutations since the store was opened.
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }

    /// Number of storage writes that failed since the store was opened.
    pub fn persist_failures(&self) -> u64 {
        self.persist_failures.load(Ordering::Relaxed)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn event_bus(&self) -> &Arc<EventBus> {
        &self.bus
    }

    /// Registers a handler called after each mutation.
    ///
    /// Handlers run on the mutating thread once the store lock has been
    /// released, so they may read or mutate the store.
    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&StoreEvent) + Send + Sync + 'static,
    {
        self.bus.subscribe(
            EventFilter::Categories(vec![EventCategory::Store]),
            move |event| {
                if let AppEvent::Store(event) = event {
                    handler(event);
                }
            },
        )
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    /// Channel for views that poll for changes before rendering.
    pub fn receiver(&self) -> broadcast::Receiver<AppEvent> {
        self.bus.receiver()
    }

    /// Re-reads the collection from durable storage.
    ///
    /// On failure the in-memory collection is left unchanged.
    pub fn reload(&self) -> StoreResult<usize> {
        let loaded = load(self.backend.as_ref(), &self.key)?;
        let count = loaded.polygons.len();
        let revision = {
            let mut polygons = self.polygons.write();
            *polygons = loaded.polygons;
            if loaded.assigned_ids > 0 {
                self.persist_assigned_ids(&polygons, loaded.assigned_ids);
            }
            self.revision.fetch_add(1, Ordering::SeqCst) + 1
        };
        self.notify(StoreEvent::Reloaded { revision, count });
        Ok(count)
    }

    fn remove_where<P>(&self, predicate: P) -> (u64, usize)
    where
        P: Fn(&PolygonRecord) -> bool,
    {
        let mut polygons = self.polygons.write();
        let before = polygons.len();
        polygons.retain(|p| !predicate(p));
        let removed = before - polygons.len();
        if removed == 0 {
            return (self.revision(), 0);
        }
        self.persist(&polygons);
        (self.revision.fetch_add(1, Ordering::SeqCst) + 1, removed)
    }

    /// Applies `mutation` and persists under the write lock, returning the
    /// new revision.
    fn commit<F>(&self, mutation: F) -> u64
    where
        F: FnOnce(&mut Vec<PolygonRecord>),
    {
        let mut polygons = self.polygons.write();
        mutation(&mut polygons);
        self.persist(&polygons);
        self.revision.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn persist(&self, polygons: &[PolygonRecord]) {
        let result = StoredDocument::encode(polygons)
            .and_then(|text| Ok(self.backend.write(&self.key, &text)?));
        if let Err(e) = result {
            self.persist_failures.fetch_add(1, Ordering::Relaxed);
            tracing::error!(
                "Failed to persist {} polygons to {} under '{}': {}",
                polygons.len(),
                self.backend.describe(),
                self.key,
                e
            );
        }
    }

    /// Writes back ids generated for records stored without one, so they
    /// stay stable across loads.
    fn persist_assigned_ids(&self, polygons: &[PolygonRecord], assigned: usize) {
        tracing::info!(
            "Assigned ids to {} stored polygons under '{}'",
            assigned,
            self.key
        );
        self.persist(polygons);
    }

    fn notify(&self, event: StoreEvent) {
        tracing::debug!("{}", event.description());
        if let Err(EventBusError::NoSubscribers) = self.bus.publish(AppEvent::Store(event)) {
            tracing::trace!("No store subscribers");
        }
    }
}

impl std::fmt::Debug for PolygonStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolygonStore")
            .field("key", &self.key)
            .field("backend", &self.backend.describe())
            .field("len", &self.len())
            .field("revision", &self.revision())
            .finish()
    }
}

fn load(backend: &dyn StorageBackend, key: &str) -> StoreResult<LoadedCollection> {
    match backend.read(key).map_err(StoreError::from)? {
        Some(text) => StoredDocument::decode(key, &text),
        None => Ok(LoadedCollection {
            polygons: Vec::new(),
            assigned_ids: 0,
        }),
    }
}

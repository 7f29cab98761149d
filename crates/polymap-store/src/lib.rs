//! # Polymap Store
//!
//! The persisted, observable polygon collection and the UI controller that
//! edits it. Storage backends are pluggable through [`StorageBackend`].

pub mod error;
pub mod layout;
pub mod storage;
pub mod store;
pub mod ui_integration;

pub use error::{StorageError, StorageResult, StoreError, StoreResult};
pub use layout::{LoadedCollection, StoredDocument, DEFAULT_STORAGE_KEY, STORAGE_FORMAT_VERSION};
pub use storage::{FileStorage, MemoryStorage, StorageBackend};
pub use store::PolygonStore;
pub use ui_integration::{PolygonUiController, PolygonUiModel};

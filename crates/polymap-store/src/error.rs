//! Error types for the polygon store crate.
//!
//! Structured error types for durable storage access and for decoding the
//! persisted collection.

use std::io;
use thiserror::Error;

/// Errors raised while opening or reloading the store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The persisted document could not be decoded.
    #[error("Corrupted polygon storage under '{key}': {reason}")]
    Corrupted { key: String, reason: String },

    /// The persisted document was written by a newer format.
    #[error("Unsupported storage format version {found} (max {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// An import file could not be decoded.
    #[error("Invalid import file '{source_name}': {reason}")]
    InvalidImport { source_name: String, reason: String },

    /// The storage backend failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Errors reported by storage backends.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The key cannot be used as a storage name.
    #[error("Invalid storage key: '{0}'")]
    InvalidKey(String),

    /// The value does not fit into the backend's quota.
    #[error("Storage quota exceeded: {needed} bytes needed, {quota} allowed")]
    QuotaExceeded { needed: usize, quota: usize },

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
}

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type alias for storage backend operations.
pub type StorageResult<T> = Result<T, StorageError>;

//! Polymap Settings Crate
//!
//! Handles application configuration, config file persistence, and
//! platform directory resolution.

pub mod config;
pub mod error;
pub mod manager;

pub use config::{Config, DrawingSettings, LabelSettings, MapSettings, StorageSettings};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
pub use manager::SettingsManager;

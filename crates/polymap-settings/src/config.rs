//! Configuration and settings management for polymap
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats.
//!
//! Configuration is organized into logical sections:
//! - Storage (data directory, namespace key)
//! - Map defaults (zoom, fallback center)
//! - Drawing defaults (color, opacity, stroke)
//! - Label presentation (currency format)

use polymap_core::{Color, Coordinate, CurrencyFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, SettingsError, SettingsResult};

/// Storage key the polygon collection is persisted under.
pub const DEFAULT_NAMESPACE_KEY: &str = "polygon-storage";

/// Durable storage settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory holding the storage file; platform data dir when unset
    pub data_directory: Option<PathBuf>,
    /// Key the collection is stored under
    pub namespace_key: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_directory: None,
            namespace_key: DEFAULT_NAMESPACE_KEY.to_string(),
        }
    }
}

/// Map view defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapSettings {
    /// Initial zoom level
    pub default_zoom: u8,
    /// Center used while geolocation is loading or unavailable
    pub fallback_center: Coordinate,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            default_zoom: 13,
            fallback_center: Coordinate::ORIGIN,
        }
    }
}

/// Polygon drawing defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawingSettings {
    /// Color preselected in the save form
    pub default_color: Color,
    /// Fill opacity of rendered polygons (0.0 - 1.0)
    pub fill_opacity: f64,
    /// Stroke width in pixels
    pub stroke_weight: f64,
}

impl Default for DrawingSettings {
    fn default() -> Self {
        Self {
            default_color: Color::default(),
            fill_opacity: 0.35,
            stroke_weight: 2.0,
        }
    }
}

/// Label presentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LabelSettings {
    /// Currency used for the price line
    pub currency: CurrencyFormat,
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub storage: StorageSettings,
    pub map: MapSettings,
    pub drawing: DrawingSettings,
    pub labels: LabelSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;

        let config: Self = match Format::of(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content).map_err(|e| {
            SettingsError::SaveError(format!("{}: {}", path.display(), e))
        })?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        if self.storage.namespace_key.trim().is_empty() {
            return Err(ConfigError::MissingKey("storage.namespace_key".to_string()).into());
        }

        if self.map.default_zoom > 22 {
            return Err(ConfigError::ValueOutOfRange {
                key: "map.default_zoom".to_string(),
                value: self.map.default_zoom.to_string(),
            }
            .into());
        }

        if !self.map.fallback_center.is_valid() {
            return Err(ConfigError::ValueOutOfRange {
                key: "map.fallback_center".to_string(),
                value: self.map.fallback_center.to_string(),
            }
            .into());
        }

        if !self.drawing.default_color.is_valid() {
            return Err(ConfigError::ValueOutOfRange {
                key: "drawing.default_color".to_string(),
                value: self.drawing.default_color.to_string(),
            }
            .into());
        }

        if !(0.0..=1.0).contains(&self.drawing.fill_opacity) {
            return Err(ConfigError::ValueOutOfRange {
                key: "drawing.fill_opacity".to_string(),
                value: self.drawing.fill_opacity.to_string(),
            }
            .into());
        }

        if !(self.drawing.stroke_weight.is_finite() && self.drawing.stroke_weight > 0.0) {
            return Err(ConfigError::ValueOutOfRange {
                key: "drawing.stroke_weight".to_string(),
                value: self.drawing.stroke_weight.to_string(),
            }
            .into());
        }

        Ok(())
    }
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.storage.namespace_key, "polygon-storage");
        assert_eq!(config.map.fallback_center, Coordinate::ORIGIN);
        assert_eq!(config.drawing.default_color.as_str(), "#87CEEB");
    }

    #[test]
    fn test_json_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("polymap.json");

        let mut config = Config::new();
        config.map.default_zoom = 15;
        config.storage.data_directory = Some(dir.path().to_path_buf());
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_toml_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("polymap.toml");

        let mut config = Config::new();
        config.labels.currency.symbol = "€".to_string();
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.labels.currency.symbol, "€");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("polymap.toml");
        std::fs::write(&path, "[map]\ndefault_zoom = 10\n").unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.map.default_zoom, 10);
        assert_eq!(loaded.storage, StorageSettings::default());
    }

    #[test]
    fn test_unsupported_extension() {
        let err = Config::new()
            .save_to_file(Path::new("config.yaml"))
            .unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Config(ConfigError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = Config::new();
        config.storage.namespace_key = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::new();
        config.drawing.fill_opacity = 1.5;
        assert!(config.validate().is_err());

        let mut config = Config::new();
        config.map.fallback_center = Coordinate {
            lat: 100.0,
            lng: 0.0,
        };
        assert!(config.validate().is_err());
    }
}

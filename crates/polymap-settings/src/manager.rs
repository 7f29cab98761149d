//! Settings Manager
//!
//! Resolves platform directories and loads the active configuration.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{ConfigError, SettingsResult};

const APP_DIR_NAME: &str = "polymap";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Locates and loads configuration
pub struct SettingsManager;

impl SettingsManager {
    /// Platform configuration directory (e.g. `~/.config/polymap`)
    pub fn config_dir() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or_else(|| {
                ConfigError::UnsupportedPlatform("no configuration directory".to_string()).into()
            })
    }

    /// Default configuration file path
    pub fn config_file_path() -> SettingsResult<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Platform data directory holding persisted polygons
    pub fn default_data_dir() -> SettingsResult<PathBuf> {
        dirs::data_local_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or_else(|| {
                ConfigError::UnsupportedPlatform("no local data directory".to_string()).into()
            })
    }

    /// Directory the storage backend should use for `config`
    pub fn data_dir_for(config: &Config) -> SettingsResult<PathBuf> {
        match &config.storage.data_directory {
            Some(dir) => Ok(dir.clone()),
            None => Self::default_data_dir(),
        }
    }

    /// Load configuration from `path`, or from the default location.
    ///
    /// A missing default file yields the default configuration; an explicit
    /// path that does not exist is an error.
    pub fn load(path: Option<&Path>) -> SettingsResult<Config> {
        if let Some(path) = path {
            return Config::load_from_file(path);
        }

        let default_path = Self::config_file_path()?;
        if default_path.exists() {
            Config::load_from_file(&default_path)
        } else {
            tracing::debug!(
                "No config at {}, using defaults",
                default_path.display()
            );
            Ok(Config::default())
        }
    }
}

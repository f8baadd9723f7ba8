//! Application settings loaded from `plant_tracker.toml`.
//!
//! Every section is optional; anything left out falls back to the built-in
//! defaults. A few environment variables (typically set through `.env`) override
//! the storage section after the file is read.

use crate::config::database::DEFAULT_DATABASE_URL;
use crate::errors::{Error, Result};
use crate::models::{DraftDefaults, MAX_PERCENT};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

/// Settings file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_PATH: &str = "plant_tracker.toml";

/// Default location of the JSON storage document.
pub const DEFAULT_JSON_PATH: &str = "data/plants.json";

/// Overrides `storage.database_url`
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";
/// Overrides `storage.backend`
pub const STORE_VAR: &str = "PLANT_TRACKER_STORE";
/// Overrides `storage.json_path`
pub const JSON_PATH_VAR: &str = "PLANT_TRACKER_JSON";

/// Which persistence backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// `SQLite` database through `SeaORM`
    #[default]
    Sqlite,
    /// Single JSON document
    Json,
    /// Nothing is written to disk
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "json" => Ok(Self::Json),
            "memory" => Ok(Self::Memory),
            other => Err(format!(
                "unknown storage backend '{other}' (expected sqlite, json or memory)"
            )),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Sqlite => "sqlite",
            Self::Json => "json",
            Self::Memory => "memory",
        })
    }
}

/// `[storage]` section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Selected backend
    pub backend: StorageBackend,
    /// Connection URL for the `SQLite` backend
    pub database_url: String,
    /// File used by the JSON backend
    pub json_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            json_path: PathBuf::from(DEFAULT_JSON_PATH),
        }
    }
}

/// Whole settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Persistence settings
    pub storage: StorageConfig,
    /// Prefilled values of the new-plant form
    pub defaults: DraftDefaults,
}

impl AppConfig {
    /// Rejects defaults that could never produce a valid plant.
    pub fn validate(&self) -> Result<()> {
        let defaults = &self.defaults;
        if defaults.watering_frequency == 0 {
            return Err(Error::Config {
                message: "defaults.watering_frequency must be at least 1".to_string(),
            });
        }
        if defaults.moisture_level > MAX_PERCENT || defaults.moisture_threshold > MAX_PERCENT {
            return Err(Error::Config {
                message: "defaults.moisture_level and defaults.moisture_threshold must be 0-100"
                    .to_string(),
            });
        }
        Ok(())
    }

    /// Applies environment overrides. `lookup` returns the value of a variable.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(backend) = lookup(STORE_VAR) {
            self.storage.backend = backend.parse().map_err(|message| Error::Config { message })?;
            debug!("{STORE_VAR} selects {} storage", self.storage.backend);
        }
        if let Some(url) = lookup(DATABASE_URL_VAR) {
            debug!("{DATABASE_URL_VAR} overrides database URL");
            self.storage.database_url = url;
        }
        if let Some(path) = lookup(JSON_PATH_VAR) {
            debug!("{JSON_PATH_VAR} overrides JSON path");
            self.storage.json_path = PathBuf::from(path);
        }
        Ok(())
    }
}

/// Parses settings from the file at `path`.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;
    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path_ref.display()),
    })
}

/// Loads the application configuration.
///
/// An explicitly given file must exist. Without one, [`DEFAULT_CONFIG_PATH`] is
/// read if present and built-in defaults are used otherwise. Environment
/// overrides are applied last.
pub fn load_app_configuration(explicit_path: Option<&Path>) -> Result<AppConfig> {
    let mut config = match explicit_path {
        Some(path) => load_config(path)?,
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => load_config(DEFAULT_CONFIG_PATH)?,
        None => {
            info!("No {DEFAULT_CONFIG_PATH} found, using built-in defaults");
            AppConfig::default()
        }
    };
    config.apply_overrides(|name| std::env::var(name).ok())?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
            [storage]
            backend = "json"
            database_url = "sqlite::memory:"
            json_path = "/tmp/plants.json"

            [defaults]
            watering_frequency = 3
            moisture_level = 60
            moisture_threshold = 25
            image = "/img/leaf.png"
        "#;

        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.storage.backend, StorageBackend::Json);
        assert_eq!(config.storage.json_path, PathBuf::from("/tmp/plants.json"));
        assert_eq!(config.defaults.watering_frequency, 3);
        assert_eq!(config.defaults.moisture_level, 60);
        assert_eq!(config.defaults.moisture_threshold, 25);
        assert_eq!(config.defaults.image, "/img/leaf.png");
        config.validate().unwrap();
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: AppConfig = toml::from_str("[defaults]\nwatering_frequency = 14\n").unwrap();
        assert_eq!(config.storage, StorageConfig::default());
        assert_eq!(config.defaults.watering_frequency, 14);
        assert_eq!(config.defaults.moisture_threshold, 30);

        let empty: AppConfig = toml::from_str("").unwrap();
        assert_eq!(empty, AppConfig::default());
    }

    #[test]
    fn test_invalid_defaults_are_rejected() {
        let config: AppConfig = toml::from_str("[defaults]\nwatering_frequency = 0\n").unwrap();
        assert!(matches!(config.validate(), Err(Error::Config { .. })));

        let config: AppConfig = toml::from_str("[defaults]\nmoisture_threshold = 120\n").unwrap();
        assert!(matches!(config.validate(), Err(Error::Config { .. })));
    }

    #[test]
    fn test_environment_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (STORE_VAR, "JSON"),
            (JSON_PATH_VAR, "elsewhere/plants.json"),
        ]);
        let mut config = AppConfig::default();
        config
            .apply_overrides(|name| vars.get(name).map(ToString::to_string))
            .unwrap();

        assert_eq!(config.storage.backend, StorageBackend::Json);
        assert_eq!(
            config.storage.json_path,
            PathBuf::from("elsewhere/plants.json")
        );
        assert_eq!(config.storage.database_url, DEFAULT_DATABASE_URL);
    }

    #[test]
    fn test_unknown_backend_override_is_config_error() {
        let mut config = AppConfig::default();
        let result = config.apply_overrides(|name| (name == STORE_VAR).then(|| "redis".to_string()));
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_missing_explicit_file_is_config_error() {
        let result = load_app_configuration(Some(Path::new("does/not/exist.toml")));
        assert!(matches!(result, Err(Error::Config { .. })));
    }
}

/// Database connection and table creation
pub mod database;

/// Settings file and environment overrides
pub mod settings;

pub use settings::{AppConfig, StorageBackend, StorageConfig, load_app_configuration, load_config};

//! Persistence adapter for the plant collection.
//!
//! A repository loads the whole collection once at start and saves the whole
//! collection after every change. There are no partial writes and no deltas.

/// JSON document backend
pub mod json;
/// In-process backend without durability
pub mod memory;
/// `SQLite` backend through `SeaORM`
pub mod sqlite;

pub use json::JsonPlantRepository;
pub use memory::InMemoryPlantRepository;
pub use sqlite::SqlitePlantRepository;

use crate::{
    config::{StorageBackend, StorageConfig, database},
    errors::Result,
    models::Plant,
};
use tracing::info;

/// Loads and saves the complete plant collection.
#[allow(async_fn_in_trait)]
pub trait PlantRepository {
    /// Reads the stored collection. `None` means nothing has been stored yet.
    async fn load(&self) -> Result<Option<Vec<Plant>>>;

    /// Replaces the stored collection with `plants`.
    async fn save(&mut self, plants: &[Plant]) -> Result<()>;
}

/// Repository selected from configuration at runtime.
#[derive(Debug)]
pub enum Storage {
    /// `SQLite` database
    Sqlite(SqlitePlantRepository),
    /// JSON file
    Json(JsonPlantRepository),
    /// Process memory
    Memory(InMemoryPlantRepository),
}

impl Storage {
    /// Opens the backend described by `config`.
    pub async fn open(config: &StorageConfig) -> Result<Self> {
        match config.backend {
            StorageBackend::Sqlite => {
                let db = database::create_connection(&config.database_url).await?;
                database::create_tables(&db).await?;
                info!("Using SQLite storage at {}", config.database_url);
                Ok(Self::Sqlite(SqlitePlantRepository::new(db)))
            }
            StorageBackend::Json => {
                info!("Using JSON storage at {}", config.json_path.display());
                Ok(Self::Json(JsonPlantRepository::new(&config.json_path)))
            }
            StorageBackend::Memory => {
                info!("Using in-memory storage; changes will not be kept");
                Ok(Self::Memory(InMemoryPlantRepository::default()))
            }
        }
    }
}

impl PlantRepository for Storage {
    async fn load(&self) -> Result<Option<Vec<Plant>>> {
        match self {
            Self::Sqlite(repo) => repo.load().await,
            Self::Json(repo) => repo.load().await,
            Self::Memory(repo) => repo.load().await,
        }
    }

    async fn save(&mut self, plants: &[Plant]) -> Result<()> {
        match self {
            Self::Sqlite(repo) => repo.save(plants).await,
            Self::Json(repo) => repo.save(plants).await,
            Self::Memory(repo) => repo.save(plants).await,
        }
    }
}

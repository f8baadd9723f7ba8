//! Database configuration module for the `SQLite` storage backend.
//!
//! Handles opening the `SQLite` connection and creating the `plants` table from
//! the entity definition with `Schema::create_table_from_entity`, so the schema
//! always matches the Rust struct without hand-written SQL.

use crate::entities::PlantEntity;
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use std::path::Path;
use tracing::{debug, instrument};

/// Default database location, created on first use.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/plants.sqlite?mode=rwc";

/// Returns the filesystem path of a file-backed `SQLite` URL, or `None` for
/// in-memory databases and other schemes.
#[must_use]
pub fn sqlite_file_path(database_url: &str) -> Option<&Path> {
    let rest = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or_default();
    if path.is_empty() || path == ":memory:" {
        None
    } else {
        Some(Path::new(path))
    }
}

/// Establishes a connection to the database at `database_url`.
///
/// For file-backed `SQLite` URLs the parent directory is created first.
#[instrument]
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    if let Some(parent) = sqlite_file_path(database_url)
        .and_then(Path::parent)
        .filter(|parent| !parent.as_os_str().is_empty())
    {
        debug!("Ensuring database directory {}", parent.display());
        std::fs::create_dir_all(parent)?;
    }
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates the `plants` table if it does not exist yet.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut plant_table = schema.create_table_from_entity(PlantEntity);
    plant_table.if_not_exists();

    db.execute(builder.build(&plant_table)).await?;
    Ok(())
}

//! `SQLite` storage through `SeaORM`.
//!
//! Saving replaces the whole `plants` table inside one database transaction,
//! so a failed save leaves the previous collection in place.

use super::PlantRepository;
use crate::{
    entities::{PlantEntity, plant},
    errors::Result,
    models::Plant,
};
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder, TransactionTrait};
use tracing::{debug, instrument};

/// Stores the collection in the `plants` table.
#[derive(Debug, Clone)]
pub struct SqlitePlantRepository {
    db: DatabaseConnection,
}

impl SqlitePlantRepository {
    /// Repository over an open connection whose tables already exist.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// The underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl PlantRepository for SqlitePlantRepository {
    /// An empty table loads as absent.
    #[instrument(skip(self))]
    async fn load(&self) -> Result<Option<Vec<Plant>>> {
        let rows = PlantEntity::find()
            .order_by_asc(plant::Column::Position)
            .all(&self.db)
            .await?;
        if rows.is_empty() {
            return Ok(None);
        }
        let plants = rows
            .into_iter()
            .map(Plant::try_from)
            .collect::<Result<Vec<_>>>()?;
        debug!("Loaded {} plants", plants.len());
        Ok(Some(plants))
    }

    #[instrument(skip(self, plants), fields(count = plants.len()))]
    async fn save(&mut self, plants: &[Plant]) -> Result<()> {
        let rows = plants
            .iter()
            .enumerate()
            .map(|(position, plant)| plant::to_active_model(plant, position))
            .collect::<Result<Vec<_>>>()?;

        let txn = self.db.begin().await?;
        PlantEntity::delete_many().exec(&txn).await?;
        if !rows.is_empty() {
            PlantEntity::insert_many(rows)
                .exec_without_returning(&txn)
                .await?;
        }
        txn.commit().await?;

        debug!("Saved plants");
        Ok(())
    }
}

use super::PlantRepository;
use crate::{errors::Result, models::Plant};

/// Keeps the last saved collection in memory.
#[derive(Debug, Default, Clone)]
pub struct InMemoryPlantRepository {
    saved: Option<Vec<Plant>>,
    save_count: usize,
}

impl InMemoryPlantRepository {
    /// Repository that starts out holding `plants`.
    #[must_use]
    pub fn with_plants(plants: Vec<Plant>) -> Self {
        Self {
            saved: Some(plants),
            save_count: 0,
        }
    }

    /// Number of times `save` has been called.
    #[must_use]
    pub const fn save_count(&self) -> usize {
        self.save_count
    }

    /// The most recently saved collection.
    #[must_use]
    pub fn saved(&self) -> Option<&[Plant]> {
        self.saved.as_deref()
    }
}

impl PlantRepository for InMemoryPlantRepository {
    async fn load(&self) -> Result<Option<Vec<Plant>>> {
        Ok(self.saved.clone())
    }

    async fn save(&mut self, plants: &[Plant]) -> Result<()> {
        self.saved = Some(plants.to_vec());
        self.save_count += 1;
        Ok(())
    }
}

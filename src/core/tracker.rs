//! The plant tracker store.
//!
//! `PlantTracker` owns the working collection, the new-plant draft and the edit
//! buffer. Each action computes a new collection with the pure functions in
//! [`crate::core::plant`], swaps it in, saves the full collection through the
//! repository and finally hands a notification to the notifier.

use crate::{
    core::{
        notification::{Notification, Notifier},
        plant::{self, Mutation},
        sensor::MoistureSensor,
        status::{PlantStatus, is_clock_skewed},
    },
    errors::Result,
    models::{DraftDefaults, Plant, PlantDraft, PlantEdit},
    storage::PlantRepository,
};
use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument, warn};

/// Explicit store for the plant collection.
pub struct PlantTracker<R, N, S> {
    plants: Vec<Plant>,
    draft: PlantDraft,
    editing: Option<PlantEdit>,
    defaults: DraftDefaults,
    repository: R,
    notifier: N,
    sensor: S,
}

impl<R, N, S> PlantTracker<R, N, S>
where
    R: PlantRepository,
    N: Notifier,
    S: MoistureSensor,
{
    /// Hydrates the collection from `repository`. Called once at start.
    #[instrument(skip_all)]
    pub async fn open(repository: R, notifier: N, sensor: S, defaults: DraftDefaults) -> Result<Self> {
        let plants = repository.load().await?.unwrap_or_default();
        info!("Loaded {} plants", plants.len());

        let now = Utc::now();
        for skewed in plants.iter().filter(|p| {
            is_clock_skewed(p.last_watered, now) || is_clock_skewed(p.last_moisture_reading, now)
        }) {
            warn!(
                "Plant '{}' ({}) has timestamps in the future; day counts for it are unreliable",
                skewed.name, skewed.id
            );
        }

        Ok(Self {
            plants,
            draft: PlantDraft::from_defaults(&defaults),
            editing: None,
            defaults,
            repository,
            notifier,
            sensor,
        })
    }

    /// The current collection, in insertion order.
    #[must_use]
    pub fn plants(&self) -> &[Plant] {
        &self.plants
    }

    /// Looks up one plant.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Plant> {
        self.plants.iter().find(|plant| plant.id == id)
    }

    /// Derived status of one plant at `now`.
    #[must_use]
    pub fn status(&self, id: &str, now: DateTime<Utc>) -> Option<PlantStatus> {
        self.get(id).map(|plant| PlantStatus::evaluate(plant, now))
    }

    /// The new-plant draft.
    #[must_use]
    pub const fn draft(&self) -> &PlantDraft {
        &self.draft
    }

    /// Mutable access to the new-plant draft.
    pub fn draft_mut(&mut self) -> &mut PlantDraft {
        &mut self.draft
    }

    /// Clears the draft back to the configured defaults.
    pub fn reset_draft(&mut self) {
        self.draft = PlantDraft::from_defaults(&self.defaults);
    }

    /// The edit buffer, if an edit is in progress.
    #[must_use]
    pub const fn editing(&self) -> Option<&PlantEdit> {
        self.editing.as_ref()
    }

    /// Opens the edit buffer for `id`, prefilled from the stored plant.
    /// Returns `None` when no such plant exists.
    pub fn begin_edit(&mut self, id: &str) -> Option<&mut PlantEdit> {
        let edit = PlantEdit::from(self.get(id)?);
        self.editing = Some(edit);
        self.editing.as_mut()
    }

    /// Mutable access to the edit buffer.
    pub fn editing_mut(&mut self) -> Option<&mut PlantEdit> {
        self.editing.as_mut()
    }

    /// Discards the edit buffer.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// The persistence backend.
    #[must_use]
    pub const fn repository(&self) -> &R {
        &self.repository
    }

    /// The notification sink.
    #[must_use]
    pub const fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Adds a plant from the draft and clears the draft.
    ///
    /// On a validation error nothing changes, a rejection is emitted and the
    /// error is returned.
    #[instrument(skip(self))]
    pub async fn add(&mut self) -> Result<Plant> {
        let mutation = plant::add_plant(&self.plants, &self.draft, plant::new_plant_id(), Utc::now());
        let (plants, added) = self.reject_invalid(mutation)?;

        self.commit(plants).await?;
        self.reset_draft();
        info!("Added plant '{}' ({})", added.name, added.id);
        self.notifier.notify(Notification::plant_added(&added));
        Ok(added)
    }

    /// Writes the edit buffer back to its plant.
    ///
    /// Silently does nothing when no edit is open or the plant is gone. On a
    /// validation error the buffer stays open so it can be corrected.
    #[instrument(skip(self))]
    pub async fn update(&mut self) -> Result<Option<Plant>> {
        let Some(edit) = self.editing.as_ref() else {
            debug!("Update requested with no edit in progress");
            return Ok(None);
        };
        let mutation = plant::update_plant(&self.plants, edit).transpose();
        let Some(mutation) = mutation else {
            debug!("Plant {} no longer exists; dropping edit", edit.id);
            self.editing = None;
            return Ok(None);
        };
        let (plants, updated) = self.reject_invalid(mutation)?;

        self.commit(plants).await?;
        self.editing = None;
        info!("Updated plant '{}' ({})", updated.name, updated.id);
        self.notifier.notify(Notification::plant_updated(&updated));
        Ok(Some(updated))
    }

    /// Removes a plant. Unknown ids are a silent no-op.
    #[instrument(skip(self))]
    pub async fn delete(&mut self, id: &str) -> Result<Option<Plant>> {
        let Some((plants, removed)) = plant::delete_plant(&self.plants, id) else {
            debug!("No plant {id} to delete");
            return Ok(None);
        };
        self.commit(plants).await?;
        if self.editing.as_ref().is_some_and(|edit| edit.id == removed.id) {
            self.editing = None;
        }
        info!("Removed plant '{}' ({})", removed.name, removed.id);
        self.notifier.notify(Notification::plant_removed(&removed));
        Ok(Some(removed))
    }

    /// Records a watering now. Unknown ids are a silent no-op.
    #[instrument(skip(self))]
    pub async fn water(&mut self, id: &str) -> Result<Option<Plant>> {
        let Some((plants, watered)) = plant::water_plant(&self.plants, id, Utc::now()) else {
            debug!("No plant {id} to water");
            return Ok(None);
        };
        self.commit(plants).await?;
        info!("Watered plant '{}' ({})", watered.name, watered.id);
        self.notifier.notify(Notification::plant_watered(&watered));
        Ok(Some(watered))
    }

    /// Sets the moisture level, clamped to 0-100.
    #[instrument(skip(self))]
    pub async fn set_moisture(&mut self, id: &str, level: i64) -> Result<Option<Plant>> {
        let mutation = plant::set_moisture(&self.plants, id, level, Utc::now());
        self.apply_quietly(mutation).await
    }

    /// Sets the moisture threshold, clamped to 0-100.
    #[instrument(skip(self))]
    pub async fn set_threshold(&mut self, id: &str, value: i64) -> Result<Option<Plant>> {
        let mutation = plant::set_threshold(&self.plants, id, value);
        self.apply_quietly(mutation).await
    }

    /// Takes a reading from the (simulated) sensor and stores it.
    #[instrument(skip(self))]
    pub async fn take_reading(&mut self, id: &str) -> Result<Option<Plant>> {
        if self.get(id).is_none() {
            debug!("No plant {id} to read");
            return Ok(None);
        }
        let reading = self.sensor.read();
        let updated = self.set_moisture(id, i64::from(reading)).await?;
        if updated.is_some() {
            self.notifier.notify(Notification::moisture_reading(reading));
        }
        Ok(updated)
    }

    fn reject_invalid(&mut self, mutation: Result<Mutation>) -> Result<Mutation> {
        mutation.inspect_err(|error| {
            if let Some(rejection) = Notification::for_validation_error(error) {
                warn!("Rejected: {error}");
                self.notifier.notify(rejection);
            }
        })
    }

    async fn apply_quietly(&mut self, mutation: Option<Mutation>) -> Result<Option<Plant>> {
        let Some((plants, changed)) = mutation else {
            return Ok(None);
        };
        self.commit(plants).await?;
        Ok(Some(changed))
    }

    async fn commit(&mut self, plants: Vec<Plant>) -> Result<()> {
        self.plants = plants;
        self.repository.save(&self.plants).await
    }
}

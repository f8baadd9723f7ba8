//! Plant collection business logic.
//!
//! Every operation takes the current collection by reference and returns a new
//! collection together with the affected plant, or `None` when no plant has the
//! requested id. Validation happens before anything is built, so a rejected
//! request never yields a partially modified collection.

use crate::{
    errors::{Error, Result},
    models::{MAX_PERCENT, Plant, PlantDraft, PlantEdit, WateringFrequency, clamp_percent},
};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Result of a successful mutation: the new collection and the affected plant.
pub type Mutation = (Vec<Plant>, Plant);

/// Generates a fresh opaque plant id.
#[must_use]
pub fn new_plant_id() -> String {
    Uuid::new_v4().to_string()
}

/// Checks the fields shared by the add and edit forms and returns the resolved
/// watering interval.
pub fn validate_form(name: &str, plant_type: &str, frequency: WateringFrequency) -> Result<u32> {
    if name.trim().is_empty() {
        return Err(Error::MissingField { field: "name" });
    }
    if plant_type.trim().is_empty() {
        return Err(Error::MissingField { field: "type" });
    }
    frequency.resolved().ok_or_else(|| Error::InvalidFrequency {
        message: "custom frequency selected without a number of days".to_string(),
    })
}

/// Appends a new plant built from `draft`.
///
/// Both timestamps are set to `now`. Fails without touching the collection when
/// the name or type is empty or the frequency is unresolved.
pub fn add_plant(
    plants: &[Plant],
    draft: &PlantDraft,
    id: String,
    now: DateTime<Utc>,
) -> Result<Mutation> {
    let watering_frequency = validate_form(&draft.name, &draft.plant_type, draft.frequency)?;

    let plant = Plant {
        id,
        name: draft.name.trim().to_string(),
        plant_type: draft.plant_type.trim().to_string(),
        last_watered: now,
        watering_frequency,
        image: draft.image.clone(),
        moisture_level: draft.moisture_level.min(MAX_PERCENT),
        moisture_threshold: draft.moisture_threshold.min(MAX_PERCENT),
        last_moisture_reading: now,
    };

    let mut updated = plants.to_vec();
    updated.push(plant.clone());
    Ok((updated, plant))
}

/// Applies an edit buffer to the plant with the same id, keeping its position.
///
/// Returns `Ok(None)` when the plant no longer exists.
pub fn update_plant(plants: &[Plant], edit: &PlantEdit) -> Result<Option<Mutation>> {
    let watering_frequency = validate_form(&edit.name, &edit.plant_type, edit.frequency)?;

    Ok(modify(plants, &edit.id, |plant| {
        plant.name = edit.name.trim().to_string();
        plant.plant_type = edit.plant_type.trim().to_string();
        plant.watering_frequency = watering_frequency;
        plant.image.clone_from(&edit.image);
    }))
}

/// Removes the plant with `id`.
#[must_use]
pub fn delete_plant(plants: &[Plant], id: &str) -> Option<Mutation> {
    let index = plants.iter().position(|plant| plant.id == id)?;
    let mut updated = plants.to_vec();
    let removed = updated.remove(index);
    Some((updated, removed))
}

/// Records a watering at `now`. Nothing else changes.
#[must_use]
pub fn water_plant(plants: &[Plant], id: &str, now: DateTime<Utc>) -> Option<Mutation> {
    modify(plants, id, |plant| plant.last_watered = now)
}

/// Stores a moisture reading, clamped to 0-100, and stamps the reading time.
#[must_use]
pub fn set_moisture(plants: &[Plant], id: &str, level: i64, now: DateTime<Utc>) -> Option<Mutation> {
    let level = clamp_percent(level);
    modify(plants, id, |plant| {
        plant.moisture_level = level;
        plant.last_moisture_reading = now;
    })
}

/// Sets the moisture threshold, clamped to 0-100.
#[must_use]
pub fn set_threshold(plants: &[Plant], id: &str, value: i64) -> Option<Mutation> {
    let value = clamp_percent(value);
    modify(plants, id, |plant| plant.moisture_threshold = value)
}

fn modify(plants: &[Plant], id: &str, apply: impl FnOnce(&mut Plant)) -> Option<Mutation> {
    let index = plants.iter().position(|plant| plant.id == id)?;
    let mut updated = plants.to_vec();
    apply(&mut updated[index]);
    let changed = updated[index].clone();
    Some((updated, changed))
}

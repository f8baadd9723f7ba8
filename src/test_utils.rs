//! Shared test utilities for the plant tracker.
//!
//! Helpers for building plants with sensible defaults, setting up an in-memory
//! database and observing what the tracker emits.

use crate::{
    core::{Notification, Notifier, PlantTracker, sensor::MoistureSensor},
    errors::Result,
    models::{DraftDefaults, PLACEHOLDER_IMAGE, Plant, PlantDraft, WateringFrequency},
    storage::InMemoryPlantRepository,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use sea_orm::DatabaseConnection;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Installs a test-writer subscriber once per test binary.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// A fixed instant with a sub-second part, so round trips are checked at
/// full precision.
#[allow(clippy::unwrap_used)]
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap() + Duration::milliseconds(250)
}

/// `now` minus `days` whole days.
pub fn days_ago(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    now - Duration::days(days)
}

/// A plant with sensible defaults, last watered and read at `last_watered`.
///
/// # Defaults
/// * `type`: "Houseplant"
/// * `watering_frequency`: 7
/// * `moisture_level`: 50
/// * `moisture_threshold`: 30
pub fn sample_plant(name: &str, last_watered: DateTime<Utc>) -> Plant {
    Plant {
        id: crate::core::plant::new_plant_id(),
        name: name.to_string(),
        plant_type: "Houseplant".to_string(),
        last_watered,
        watering_frequency: 7,
        image: PLACEHOLDER_IMAGE.to_string(),
        moisture_level: 50,
        moisture_threshold: 30,
        last_moisture_reading: last_watered,
    }
}

/// A filled-in new-plant form with a weekly schedule.
pub fn sample_draft(name: &str, plant_type: &str) -> PlantDraft {
    PlantDraft {
        name: name.to_string(),
        plant_type: plant_type.to_string(),
        frequency: WateringFrequency::Days(7),
        ..PlantDraft::default()
    }
}

/// A unique JSON file path under the system temp directory.
pub fn temp_json_path() -> PathBuf {
    std::env::temp_dir().join(format!(
        "plant-tracker-test-{}.json",
        crate::core::plant::new_plant_id()
    ))
}

/// Notifier that keeps everything it receives.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    received: Vec<Notification>,
}

impl RecordingNotifier {
    /// Notifications received so far, oldest first.
    pub fn received(&self) -> Vec<Notification> {
        self.received.clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, notification: Notification) {
        self.received.push(notification);
    }
}

/// Sensor that always reports the same level.
#[derive(Debug, Clone, Copy)]
pub struct FixedSensor(pub u8);

impl MoistureSensor for FixedSensor {
    fn read(&mut self) -> u8 {
        self.0
    }
}

/// Tracker over an in-memory repository preloaded with `plants`.
pub async fn open_test_tracker(
    plants: Vec<Plant>,
) -> Result<PlantTracker<InMemoryPlantRepository, RecordingNotifier, FixedSensor>> {
    PlantTracker::open(
        InMemoryPlantRepository::with_plants(plants),
        RecordingNotifier::default(),
        FixedSensor(42),
        DraftDefaults::default(),
    )
    .await
}

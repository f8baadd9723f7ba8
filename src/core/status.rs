//! Watering status engine.
//!
//! Pure functions deriving a plant's watering urgency from its stored fields and
//! the current time. Nothing here touches storage or the clock; callers pass
//! `now` explicitly.

use crate::models::Plant;
use chrono::{DateTime, Utc};

const MILLIS_PER_DAY: u64 = 24 * 60 * 60 * 1000;

/// Whole days between `timestamp` and `now`, rounded up.
///
/// Uses the absolute difference, so a timestamp in the future yields a
/// positive count as well. See [`is_clock_skewed`] for detecting that case.
#[must_use]
pub fn days_since(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    let elapsed_ms = now
        .signed_duration_since(timestamp)
        .num_milliseconds()
        .unsigned_abs();
    elapsed_ms.div_ceil(MILLIS_PER_DAY)
}

/// True when `timestamp` lies after `now`, i.e. the clock moved backward since
/// it was recorded.
#[must_use]
pub fn is_clock_skewed(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    timestamp > now
}

/// A plant needs water only when it is due on schedule AND its soil is drier
/// than its threshold. Being exactly `watering_frequency` days out counts as due.
#[must_use]
pub fn needs_watering(plant: &Plant, now: DateTime<Utc>) -> bool {
    let due = days_since(plant.last_watered, now) >= u64::from(plant.watering_frequency);
    let dry = plant.moisture_level < plant.moisture_threshold;
    due && dry
}

/// Days left until the schedule says to water again, never below zero.
///
/// Display only: moisture is not considered, so this can reach 0 while
/// [`needs_watering`] is still false.
#[must_use]
pub fn days_until_next_watering(plant: &Plant, now: DateTime<Utc>) -> u32 {
    let elapsed = u32::try_from(days_since(plant.last_watered, now)).unwrap_or(u32::MAX);
    plant.watering_frequency.saturating_sub(elapsed)
}

/// Fill fraction of the schedule progress bar, in `[0, 1]`.
#[must_use]
pub fn progress_fraction(plant: &Plant, now: DateTime<Utc>) -> f64 {
    if plant.watering_frequency == 0 {
        return 1.0;
    }
    let remaining = f64::from(days_until_next_watering(plant, now));
    1.0 - remaining / f64::from(plant.watering_frequency)
}

/// Display urgency of a plant, from most to least pressing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    /// Due on schedule and below the moisture threshold
    NeedsWater,
    /// Within the last third of the watering interval
    Soon,
    /// Plenty of time left
    Healthy,
}

impl Urgency {
    /// Colored marker used in text output.
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::NeedsWater => "🔴",
            Self::Soon => "🟡",
            Self::Healthy => "🟢",
        }
    }
}

/// Classifies a plant for display.
#[must_use]
pub fn urgency(plant: &Plant, now: DateTime<Utc>) -> Urgency {
    if needs_watering(plant, now) {
        Urgency::NeedsWater
    } else if days_until_next_watering(plant, now) <= plant.watering_frequency.div_ceil(3) {
        Urgency::Soon
    } else {
        Urgency::Healthy
    }
}

/// Snapshot of every derived value for one plant at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct PlantStatus {
    /// Days since the last watering
    pub days_since_watered: u64,
    /// Days until the next scheduled watering
    pub days_until_next: u32,
    /// Whether the plant needs water now
    pub needs_water: bool,
    /// Progress bar fill fraction
    pub progress: f64,
    /// Display urgency
    pub urgency: Urgency,
    /// Whether the plant's timestamps lie in the future
    pub clock_skewed: bool,
}

impl PlantStatus {
    /// Computes the status of `plant` at `now`.
    #[must_use]
    pub fn evaluate(plant: &Plant, now: DateTime<Utc>) -> Self {
        Self {
            days_since_watered: days_since(plant.last_watered, now),
            days_until_next: days_until_next_watering(plant, now),
            needs_water: needs_watering(plant, now),
            progress: progress_fraction(plant, now),
            urgency: urgency(plant, now),
            clock_skewed: is_clock_skewed(plant.last_watered, now)
                || is_clock_skewed(plant.last_moisture_reading, now),
        }
    }

    /// One-line summary: "Needs watering now!" or "Water in N days".
    #[must_use]
    pub fn status_line(&self) -> String {
        if self.needs_water {
            "Needs watering now!".to_string()
        } else {
            let plural = if self.days_until_next == 1 { "" } else { "s" };
            format!("Water in {} day{plural}", self.days_until_next)
        }
    }
}

//! Text rendering of plant status.
//!
//! Builds the strings shown by the front end: a progress bar for the watering
//! schedule and a card per plant. Everything here is pure; the current time is
//! passed in.

use crate::{
    core::status::{PlantStatus, Urgency},
    models::{Plant, frequency_label},
};
use chrono::{DateTime, Local, Utc};
use std::fmt::Write;

/// Generates a progress bar string for visual representation.
///
/// Creates a text-based progress bar like: `[████████░░] 80%`
///
/// # Arguments
/// * `fraction` - Fill fraction, clamped to `[0, 1]`
/// * `bar_length` - Length of the progress bar in characters (default 10)
#[must_use]
pub fn format_progress_bar(fraction: f64, bar_length: Option<usize>) -> String {
    let length = bar_length.unwrap_or(10);
    let clamped = if fraction.is_finite() {
        fraction.clamp(0.0, 1.0)
    } else {
        0.0
    };

    // Cast safety: clamped ∈ [0, 1] and length is small, so the product fits in usize.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let filled = (clamped * length as f64).round() as usize;
    let empty = length.saturating_sub(filled);

    let filled_str = "█".repeat(filled);
    let empty_str = "░".repeat(empty);
    let percent = clamped * 100.0;

    format!("[{filled_str}{empty_str}] {percent:.0}%")
}

/// Formats a timestamp as a local calendar date.
#[must_use]
pub fn format_date(timestamp: DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format("%Y-%m-%d").to_string()
}

/// Formats a timestamp as a local time of day.
#[must_use]
pub fn format_time(timestamp: DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format("%H:%M:%S").to_string()
}

/// Renders one plant as a multi-line card.
#[must_use]
pub fn format_plant_card(plant: &Plant, now: DateTime<Utc>) -> String {
    let status = PlantStatus::evaluate(plant, now);
    let mut card = String::new();

    let drop = if status.urgency == Urgency::NeedsWater {
        " 💧"
    } else {
        ""
    };
    // Writing to a String cannot fail
    let _ = writeln!(
        card,
        "{} {}{drop}\n   {} · {}",
        status.urgency.marker(),
        plant.name,
        plant.plant_type,
        frequency_label(plant.watering_frequency)
    );
    let _ = writeln!(
        card,
        "   {} {}",
        format_progress_bar(status.progress, None),
        status.status_line()
    );
    let _ = writeln!(card, "   Last watered: {}", format_date(plant.last_watered));
    let _ = writeln!(
        card,
        "   Soil Moisture: {}% (threshold {}%) · Last reading: {}",
        plant.moisture_level,
        plant.moisture_threshold,
        format_time(plant.last_moisture_reading)
    );
    let _ = writeln!(card, "   Image: {}", plant.image);
    let _ = write!(card, "   ID: {}", plant.id);
    if status.clock_skewed {
        card.push_str("\n   ⚠ recorded in the future; check the system clock");
    }
    card
}

/// Renders the whole collection, or the empty-state message.
#[must_use]
pub fn format_collection(plants: &[Plant], now: DateTime<Utc>) -> String {
    if plants.is_empty() {
        return "No plants added yet\nAdd your first plant to start tracking when to water it"
            .to_string();
    }
    plants
        .iter()
        .map(|plant| format_plant_card(plant, now))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{days_ago, fixed_now, sample_plant};

    #[test]
    fn test_format_progress_bar() {
        assert_eq!(format_progress_bar(0.0, None), "[░░░░░░░░░░] 0%");
        assert_eq!(format_progress_bar(0.5, None), "[█████░░░░░] 50%");
        assert_eq!(format_progress_bar(1.0, Some(4)), "[████] 100%");
    }

    #[test]
    fn test_format_progress_bar_clamps() {
        assert_eq!(format_progress_bar(1.7, Some(4)), "[████] 100%");
        assert_eq!(format_progress_bar(-0.3, Some(4)), "[░░░░] 0%");
        assert_eq!(format_progress_bar(f64::NAN, Some(4)), "[░░░░] 0%");
    }

    #[test]
    fn test_card_for_thirsty_plant() {
        let now = fixed_now();
        let mut plant = sample_plant("Monstera", days_ago(now, 8));
        plant.moisture_level = 20;

        let card = format_plant_card(&plant, now);

        assert!(card.starts_with("🔴 Monstera 💧"));
        assert!(card.contains("Needs watering now!"));
        assert!(card.contains("[██████████] 100%"));
        assert!(card.contains("Soil Moisture: 20% (threshold 30%)"));
        assert!(card.contains(&plant.id));
        assert!(!card.contains("future"));
    }

    #[test]
    fn test_card_for_healthy_plant() {
        let now = fixed_now();
        let plant = sample_plant("Fern", days_ago(now, 1));

        let card = format_plant_card(&plant, now);

        assert!(card.starts_with("🟢 Fern"));
        assert!(card.contains("Houseplant · Weekly"));
        assert!(card.contains("Water in 6 days"));
    }

    #[test]
    fn test_empty_collection_message() {
        assert!(format_collection(&[], fixed_now()).starts_with("No plants added yet"));
    }

    #[test]
    fn test_collection_lists_every_plant() {
        let now = fixed_now();
        let plants = vec![sample_plant("Fern", now), sample_plant("Palm", now)];
        let text = format_collection(&plants, now);
        assert!(text.contains("Fern"));
        assert!(text.contains("Palm"));
    }
}

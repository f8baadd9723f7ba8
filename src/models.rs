//! Plain data types shared by every layer: the persisted `Plant` record and the
//! transient form state used while adding or editing a plant.

use crate::errors::{Error, Result as CrateResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Image used when a plant has no picture of its own.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg?height=100&width=100";

/// Watering intervals offered by the add/edit forms, in days, with their labels.
pub const PRESET_FREQUENCIES: [(u32, &str); 8] = [
    (1, "Daily"),
    (2, "Every 2 days"),
    (3, "Every 3 days"),
    (5, "Every 5 days"),
    (7, "Weekly"),
    (10, "Every 10 days"),
    (14, "Bi-weekly"),
    (30, "Monthly"),
];

/// Upper bound accepted for a custom watering interval.
pub const MAX_CUSTOM_FREQUENCY: u32 = 365;

/// Upper bound of moisture level and threshold.
pub const MAX_PERCENT: u8 = 100;

/// A tracked plant. This is the only persisted entity.
///
/// The serde representation is the storage record format: camelCase keys,
/// `type` for the category label and RFC 3339 text for timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plant {
    /// Opaque unique identifier, assigned at creation
    pub id: String,
    /// Display name
    pub name: String,
    /// Species or category label
    #[serde(rename = "type")]
    pub plant_type: String,
    /// Time of the last watering
    pub last_watered: DateTime<Utc>,
    /// Target watering interval in days, at least 1
    pub watering_frequency: u32,
    /// Display image URI
    pub image: String,
    /// Current (simulated) soil moisture, 0-100
    pub moisture_level: u8,
    /// Moisture below which watering is warranted, 0-100
    pub moisture_threshold: u8,
    /// Time of the most recent moisture update
    pub last_moisture_reading: DateTime<Utc>,
}

impl Plant {
    /// Checks a record read back from storage: interval of at least one day,
    /// moisture level and threshold within 0-100.
    pub fn check_stored(&self) -> CrateResult<()> {
        if self.watering_frequency < 1 {
            return Err(Error::Storage {
                message: format!(
                    "Plant {} has invalid watering frequency {}",
                    self.id, self.watering_frequency
                ),
            });
        }
        for (column, value) in [
            ("moisture_level", self.moisture_level),
            ("moisture_threshold", self.moisture_threshold),
        ] {
            if value > MAX_PERCENT {
                return Err(Error::Storage {
                    message: format!("Plant {} has {column} {value} outside 0-100", self.id),
                });
            }
        }
        Ok(())
    }
}

/// Watering interval as chosen in a form.
///
/// `Custom(None)` is the state right after "custom" was picked and before a
/// number was typed; it must be resolved before the form is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WateringFrequency {
    /// A resolved interval in days
    Days(u32),
    /// Custom interval, possibly still without a value
    Custom(Option<u32>),
}

impl WateringFrequency {
    /// Returns the interval in days if the selection is usable.
    #[must_use]
    pub const fn resolved(self) -> Option<u32> {
        match self {
            Self::Days(days) | Self::Custom(Some(days)) if days >= 1 => Some(days),
            _ => None,
        }
    }

    /// Applies the text typed into the custom-days field.
    #[must_use]
    pub fn with_custom_input(input: &str) -> Self {
        Self::Custom(Some(parse_custom_days(input)))
    }

    /// Label shown for this selection.
    #[must_use]
    pub fn label(self) -> String {
        match self {
            Self::Days(days) => frequency_label(days),
            Self::Custom(Some(days)) => format!("Custom ({days} days)"),
            Self::Custom(None) => "Custom...".to_string(),
        }
    }
}

impl Default for WateringFrequency {
    fn default() -> Self {
        Self::Days(7)
    }
}

impl fmt::Display for WateringFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl FromStr for WateringFrequency {
    type Err = String;

    /// Parses a form selection: one of the preset day counts or `custom`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        if value.eq_ignore_ascii_case("custom") {
            return Ok(Self::Custom(None));
        }
        let days: u32 = value
            .parse()
            .map_err(|_| format!("'{value}' is not a number of days or 'custom'"))?;
        if PRESET_FREQUENCIES.iter().any(|(preset, _)| *preset == days) {
            Ok(Self::Days(days))
        } else {
            let presets = PRESET_FREQUENCIES
                .iter()
                .map(|(preset, _)| preset.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            Err(format!(
                "{days} is not a preset frequency ({presets}); use 'custom' with --custom-days"
            ))
        }
    }
}

/// Human label for a day count, using the preset names where one exists.
#[must_use]
pub fn frequency_label(days: u32) -> String {
    PRESET_FREQUENCIES
        .iter()
        .find(|(preset, _)| *preset == days)
        .map_or_else(|| format!("Every {days} days"), |(_, label)| (*label).to_string())
}

/// Parses a custom day count. Non-numeric or non-positive input becomes 1 and
/// anything above [`MAX_CUSTOM_FREQUENCY`] is capped.
#[must_use]
pub fn parse_custom_days(input: &str) -> u32 {
    input
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|days| *days >= 1)
        .and_then(|days| u32::try_from(days.min(i64::from(MAX_CUSTOM_FREQUENCY))).ok())
        .unwrap_or(1)
}

/// Clamps an arbitrary integer into the 0-100 percentage range.
#[must_use]
pub fn clamp_percent(value: i64) -> u8 {
    u8::try_from(value.clamp(0, i64::from(MAX_PERCENT))).unwrap_or(0)
}

/// Parses a percentage typed by the user. Fractions are truncated, out-of-range
/// values are clamped and anything non-numeric becomes 0.
#[must_use]
pub fn parse_percent(input: &str) -> u8 {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .map_or(0, |value| {
            // Clamped to [0, 100] first, so the cast cannot truncate or wrap.
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let percent = value.trunc().clamp(0.0, f64::from(MAX_PERCENT)) as u8;
            percent
        })
}

/// Defaults for a fresh new-plant form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DraftDefaults {
    /// Preselected watering interval in days
    pub watering_frequency: u32,
    /// Initial moisture level
    pub moisture_level: u8,
    /// Initial moisture threshold
    pub moisture_threshold: u8,
    /// Initial image URI
    pub image: String,
}

impl Default for DraftDefaults {
    fn default() -> Self {
        Self {
            watering_frequency: 7,
            moisture_level: 50,
            moisture_threshold: 30,
            image: PLACEHOLDER_IMAGE.to_string(),
        }
    }
}

/// State of the new-plant form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlantDraft {
    /// Display name
    pub name: String,
    /// Species or category label
    pub plant_type: String,
    /// Selected watering interval
    pub frequency: WateringFrequency,
    /// Image URI
    pub image: String,
    /// Initial moisture level
    pub moisture_level: u8,
    /// Initial moisture threshold
    pub moisture_threshold: u8,
}

impl PlantDraft {
    /// An empty form prefilled from `defaults`.
    #[must_use]
    pub fn from_defaults(defaults: &DraftDefaults) -> Self {
        Self {
            name: String::new(),
            plant_type: String::new(),
            frequency: WateringFrequency::Days(defaults.watering_frequency),
            image: defaults.image.clone(),
            moisture_level: defaults.moisture_level.min(MAX_PERCENT),
            moisture_threshold: defaults.moisture_threshold.min(MAX_PERCENT),
        }
    }
}

impl Default for PlantDraft {
    fn default() -> Self {
        Self::from_defaults(&DraftDefaults::default())
    }
}

/// Edit buffer for an existing plant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlantEdit {
    /// Id of the plant being edited
    pub id: String,
    /// Display name
    pub name: String,
    /// Species or category label
    pub plant_type: String,
    /// Selected watering interval
    pub frequency: WateringFrequency,
    /// Image URI
    pub image: String,
}

impl From<&Plant> for PlantEdit {
    fn from(plant: &Plant) -> Self {
        Self {
            id: plant.id.clone(),
            name: plant.name.clone(),
            plant_type: plant.plant_type.clone(),
            frequency: WateringFrequency::Days(plant.watering_frequency),
            image: plant.image.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{fixed_now, sample_plant};

    #[test]
    fn test_check_stored_rejects_out_of_range_records() {
        let plant = sample_plant("Fern", fixed_now());
        assert!(plant.check_stored().is_ok());

        let mut never = plant.clone();
        never.watering_frequency = 0;
        assert!(matches!(never.check_stored(), Err(Error::Storage { .. })));

        let mut soaked = plant.clone();
        soaked.moisture_level = 150;
        assert!(matches!(soaked.check_stored(), Err(Error::Storage { .. })));

        let mut picky = plant;
        picky.moisture_threshold = 101;
        assert!(matches!(picky.check_stored(), Err(Error::Storage { .. })));
    }

    #[test]
    fn test_frequency_from_str_presets_and_custom() {
        assert_eq!(
            "7".parse::<WateringFrequency>().unwrap(),
            WateringFrequency::Days(7)
        );
        assert_eq!(
            " Custom ".parse::<WateringFrequency>().unwrap(),
            WateringFrequency::Custom(None)
        );
        assert!("4".parse::<WateringFrequency>().is_err());
        assert!("weekly".parse::<WateringFrequency>().is_err());
        assert!("0".parse::<WateringFrequency>().is_err());
    }

    #[test]
    fn test_frequency_resolution() {
        assert_eq!(WateringFrequency::Days(14).resolved(), Some(14));
        assert_eq!(WateringFrequency::Custom(Some(21)).resolved(), Some(21));
        assert_eq!(WateringFrequency::Custom(None).resolved(), None);
        assert_eq!(WateringFrequency::Days(0).resolved(), None);
    }

    #[test]
    fn test_custom_input_fallbacks() {
        assert_eq!(parse_custom_days("12"), 12);
        assert_eq!(parse_custom_days("abc"), 1);
        assert_eq!(parse_custom_days("0"), 1);
        assert_eq!(parse_custom_days("-4"), 1);
        assert_eq!(parse_custom_days("1000"), MAX_CUSTOM_FREQUENCY);
        assert_eq!(
            WateringFrequency::with_custom_input("9"),
            WateringFrequency::Custom(Some(9))
        );
    }

    #[test]
    fn test_percent_clamping() {
        assert_eq!(clamp_percent(150), 100);
        assert_eq!(clamp_percent(-5), 0);
        assert_eq!(clamp_percent(42), 42);
        assert_eq!(parse_percent("55"), 55);
        assert_eq!(parse_percent("55.9"), 55);
        assert_eq!(parse_percent("250"), 100);
        assert_eq!(parse_percent("-1"), 0);
        assert_eq!(parse_percent("wet"), 0);
        assert_eq!(parse_percent(""), 0);
    }

    #[test]
    fn test_frequency_labels() {
        assert_eq!(frequency_label(1), "Daily");
        assert_eq!(frequency_label(14), "Bi-weekly");
        assert_eq!(frequency_label(21), "Every 21 days");
        assert_eq!(WateringFrequency::Custom(None).to_string(), "Custom...");
    }

    #[test]
    fn test_default_draft() {
        let draft = PlantDraft::default();
        assert!(draft.name.is_empty());
        assert!(draft.plant_type.is_empty());
        assert_eq!(draft.frequency, WateringFrequency::Days(7));
        assert_eq!(draft.image, PLACEHOLDER_IMAGE);
        assert_eq!(draft.moisture_level, 50);
        assert_eq!(draft.moisture_threshold, 30);
    }

    #[test]
    fn test_plant_record_uses_camel_case_keys() {
        let now = chrono::DateTime::parse_from_rfc3339("2024-05-01T08:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let plant = Plant {
            id: "1714552200000".to_string(),
            name: "Monstera".to_string(),
            plant_type: "Houseplant".to_string(),
            last_watered: now,
            watering_frequency: 7,
            image: PLACEHOLDER_IMAGE.to_string(),
            moisture_level: 50,
            moisture_threshold: 30,
            last_moisture_reading: now,
        };
        let json = serde_json::to_value(&plant).unwrap();
        assert_eq!(json["type"], "Houseplant");
        assert_eq!(json["wateringFrequency"], 7);
        assert_eq!(json["lastWatered"], "2024-05-01T08:30:00Z");
        assert!(json.get("plant_type").is_none());
    }
}

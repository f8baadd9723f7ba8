//! Command-line surface of the plant tracker.

/// Command handlers
pub mod commands;

use crate::{config::StorageBackend, models::WateringFrequency};
use clap::{Args, CommandFactory, Parser, Subcommand, error::ErrorKind};
use std::{ffi::OsString, path::PathBuf};

/// Parsed command line.
#[derive(Parser, Debug)]
#[command(name = "plant-tracker", version)]
#[command(about = "Keep track of when your plants need watering")]
pub struct Cli {
    /// Settings file (defaults to plant_tracker.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Storage backend, overriding the settings file: sqlite, json or memory
    #[arg(long, global = true)]
    pub store: Option<StorageBackend>,

    #[command(subcommand)]
    pub command: Commands,
}

/// One tracker action per invocation.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show every plant with its watering status
    List,
    /// Show one plant
    Show {
        /// Plant id
        #[arg(long)]
        id: String,
    },
    /// Add a new plant
    Add(AddArgs),
    /// Change name, type, schedule or image of a plant
    Edit(EditArgs),
    /// Remove a plant
    Remove {
        /// Plant id
        #[arg(long)]
        id: String,
    },
    /// Record that a plant was watered just now
    Water {
        /// Plant id
        #[arg(long)]
        id: String,
    },
    /// Set the soil moisture level (0-100)
    Moisture {
        /// Plant id
        #[arg(long)]
        id: String,
        /// New level; out-of-range values are clamped
        #[arg(long, allow_hyphen_values = true)]
        level: String,
    },
    /// Set the moisture threshold below which the plant may need water (0-100)
    Threshold {
        /// Plant id
        #[arg(long)]
        id: String,
        /// New threshold; out-of-range values are clamped
        #[arg(long, allow_hyphen_values = true)]
        value: String,
    },
    /// Take a reading from the simulated moisture sensor
    ReadSensor {
        /// Plant id
        #[arg(long)]
        id: String,
    },
    /// List the preset watering frequencies
    Frequencies,
}

/// Fields of a new plant.
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Plant name
    #[arg(short, long)]
    pub name: String,
    /// Plant type, e.g. Succulent
    #[arg(short = 't', long = "type")]
    pub plant_type: String,
    /// Watering interval: 1, 2, 3, 5, 7, 10, 14, 30 or custom
    #[arg(short, long)]
    pub frequency: Option<WateringFrequency>,
    /// Interval in days for a custom schedule
    #[arg(long)]
    pub custom_days: Option<String>,
    /// Image URI
    #[arg(long)]
    pub image: Option<String>,
    /// Initial soil moisture level
    #[arg(long, allow_hyphen_values = true)]
    pub moisture: Option<String>,
    /// Initial moisture threshold
    #[arg(long, allow_hyphen_values = true)]
    pub threshold: Option<String>,
}

/// Fields to change on an existing plant; omitted ones keep their value.
#[derive(Args, Debug)]
pub struct EditArgs {
    /// Plant id
    #[arg(long)]
    pub id: String,
    /// New name
    #[arg(short, long)]
    pub name: Option<String>,
    /// New type
    #[arg(short = 't', long = "type")]
    pub plant_type: Option<String>,
    /// New watering interval: 1, 2, 3, 5, 7, 10, 14, 30 or custom
    #[arg(short, long)]
    pub frequency: Option<WateringFrequency>,
    /// Interval in days for a custom schedule
    #[arg(long)]
    pub custom_days: Option<String>,
    /// New image URI
    #[arg(long)]
    pub image: Option<String>,
}

impl Cli {
    /// Parses `args` and rejects flag combinations the derive cannot express.
    pub fn try_parse_checked_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let cli = Self::try_parse_from(args)?;
        match &cli.command {
            Commands::Add(args) => {
                check_frequency_flags(args.frequency, args.custom_days.as_deref())?;
            }
            Commands::Edit(args) => {
                check_frequency_flags(args.frequency, args.custom_days.as_deref())?;
            }
            _ => {}
        }
        Ok(cli)
    }
}

/// `--custom-days` only goes with `--frequency custom` or no `--frequency` at all.
fn check_frequency_flags(
    frequency: Option<WateringFrequency>,
    custom_days: Option<&str>,
) -> Result<(), clap::Error> {
    match (frequency, custom_days) {
        (Some(WateringFrequency::Days(days)), Some(_)) => Err(Cli::command().error(
            ErrorKind::ArgumentConflict,
            format!("--custom-days cannot be combined with --frequency {days}; use --frequency custom"),
        )),
        _ => Ok(()),
    }
}

/// Resolves the frequency flags of a form. `--custom-days` implies `custom`.
#[must_use]
pub fn selected_frequency(
    frequency: Option<WateringFrequency>,
    custom_days: Option<&str>,
) -> Option<WateringFrequency> {
    match (frequency, custom_days) {
        (_, Some(days)) => Some(WateringFrequency::with_custom_input(days)),
        (frequency, None) => frequency,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_add_with_custom_days() {
        let cli = Cli::try_parse_from([
            "plant-tracker",
            "add",
            "--name",
            "Aloe",
            "--type",
            "Succulent",
            "--frequency",
            "custom",
            "--custom-days",
            "12",
        ])
        .unwrap();
        let Commands::Add(args) = cli.command else {
            panic!("expected add");
        };
        assert_eq!(args.frequency, Some(WateringFrequency::Custom(None)));
        assert_eq!(
            selected_frequency(args.frequency, args.custom_days.as_deref()),
            Some(WateringFrequency::Custom(Some(12)))
        );
    }

    #[test]
    fn test_command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_custom_days_conflicts_with_preset_frequency() {
        let err = Cli::try_parse_checked_from([
            "plant-tracker", "add", "--name", "Aloe", "--type", "Succulent", "--frequency", "7",
            "--custom-days", "12",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);

        let err = Cli::try_parse_checked_from([
            "plant-tracker", "edit", "--id", "a", "--frequency", "14", "--custom-days", "3",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_custom_days_alone_or_with_custom_is_accepted() {
        let cli = Cli::try_parse_checked_from([
            "plant-tracker", "add", "--name", "Aloe", "--type", "Succulent", "--custom-days", "12",
        ])
        .unwrap();
        let Commands::Add(args) = cli.command else {
            panic!("expected add");
        };
        assert_eq!(
            selected_frequency(args.frequency, args.custom_days.as_deref()),
            Some(WateringFrequency::Custom(Some(12)))
        );

        assert!(Cli::try_parse_checked_from([
            "plant-tracker", "edit", "--id", "a", "--frequency", "custom", "--custom-days", "3",
        ])
        .is_ok());
    }

    #[test]
    fn test_rejects_non_preset_frequency() {
        let parsed = Cli::try_parse_from([
            "plant-tracker", "add", "--name", "Aloe", "--type", "Succulent", "--frequency", "4",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_global_store_override() {
        let cli = Cli::try_parse_from(["plant-tracker", "list", "--store", "json"]).unwrap();
        assert_eq!(cli.store, Some(StorageBackend::Json));
        assert!(matches!(cli.command, Commands::List));
    }

    #[test]
    fn test_negative_moisture_is_accepted_as_text() {
        let cli =
            Cli::try_parse_from(["plant-tracker", "moisture", "--id", "a", "--level", "-5"])
                .unwrap();
        let Commands::Moisture { level, .. } = cli.command else {
            panic!("expected moisture");
        };
        assert_eq!(level, "-5");
    }

    #[test]
    fn test_frequency_without_custom_days_is_kept() {
        assert_eq!(
            selected_frequency(Some(WateringFrequency::Days(14)), None),
            Some(WateringFrequency::Days(14))
        );
        assert_eq!(selected_frequency(None, None), None);
    }
}

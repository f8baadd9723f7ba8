//! User notifications emitted after tracker actions.
//!
//! Notifications are fire-and-forget: the tracker hands them to a [`Notifier`]
//! and never waits for, or records, an acknowledgement.

use crate::errors::Error;
use crate::models::Plant;
use std::fmt;

/// Whether a notification confirms an action or reports a rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// The action went through
    Confirmation,
    /// The action was refused and nothing changed
    Rejection,
}

/// A short message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Confirmation or rejection
    pub kind: NotificationKind,
    /// Headline
    pub title: String,
    /// Detail line
    pub description: String,
}

impl Notification {
    fn confirmation(title: &str, description: String) -> Self {
        Self {
            kind: NotificationKind::Confirmation,
            title: title.to_string(),
            description,
        }
    }

    fn rejection(title: &str, description: &str) -> Self {
        Self {
            kind: NotificationKind::Rejection,
            title: title.to_string(),
            description: description.to_string(),
        }
    }

    /// A plant joined the collection.
    #[must_use]
    pub fn plant_added(plant: &Plant) -> Self {
        Self::confirmation(
            "Plant added",
            format!("{} has been added to your collection", plant.name),
        )
    }

    /// A plant's attributes were edited.
    #[must_use]
    pub fn plant_updated(plant: &Plant) -> Self {
        Self::confirmation("Plant updated", format!("{} has been updated", plant.name))
    }

    /// A plant was removed.
    #[must_use]
    pub fn plant_removed(plant: &Plant) -> Self {
        Self::confirmation(
            "Plant removed",
            format!("{} has been removed from your collection", plant.name),
        )
    }

    /// A plant was watered.
    #[must_use]
    pub fn plant_watered(plant: &Plant) -> Self {
        Self::confirmation("Plant watered", format!("{} has been watered", plant.name))
    }

    /// The simulated sensor produced a new reading.
    #[must_use]
    pub fn moisture_reading(level: u8) -> Self {
        Self::confirmation("Moisture Reading Updated", format!("New reading: {level}%"))
    }

    /// Rejection for a validation error, or `None` for any other error.
    #[must_use]
    pub fn for_validation_error(error: &Error) -> Option<Self> {
        match error {
            Error::MissingField { .. } => Some(Self::rejection(
                "Missing information",
                "Please fill in all the fields",
            )),
            Error::InvalidFrequency { .. } => Some(Self::rejection(
                "Invalid watering frequency",
                "Please enter a valid number of days",
            )),
            _ => None,
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}

/// Sink for notifications.
pub trait Notifier {
    /// Delivers one notification.
    fn notify(&mut self, notification: Notification);
}

//! Unified error type for the plant tracker.
//!
//! Validation failures (the only errors a user can trigger by normal input) are
//! kept apart from infrastructure failures so the front end can turn them into a
//! rejection notification instead of a crash report.

use thiserror::Error;

/// All errors produced by the crate.
#[derive(Debug, Error)]
pub enum Error {
    /// A required text field (name or type) was left empty
    #[error("Missing information: {field} is required")]
    MissingField {
        /// Name of the empty field
        field: &'static str,
    },

    /// The watering frequency was not resolved to a positive number of days
    #[error("Invalid watering frequency: {message}")]
    InvalidFrequency {
        /// What was wrong with the selection
        message: String,
    },

    /// No plant with the given id exists in the collection
    #[error("Plant not found: {id}")]
    PlantNotFound {
        /// The id that was looked up
        id: String,
    },

    /// Configuration could not be read or is inconsistent
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the problem
        message: String,
    },

    /// Stored records could not be turned back into plants
    #[error("Storage error: {message}")]
    Storage {
        /// Description of the corrupt record
        message: String,
    },

    /// Error raised by `SeaORM`
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON document could not be encoded or decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns true for input validation failures on the add/edit path.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::MissingField { .. } | Self::InvalidFrequency { .. })
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

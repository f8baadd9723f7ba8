//! Core business logic - framework-agnostic plant operations, status derivation
//! and the tracker store that ties them to persistence.

/// User notifications and the notifier seam
pub mod notification;
/// Pure operations over the plant collection
pub mod plant;
/// Text rendering of plant status
pub mod report;
/// Moisture sensor seam and its simulation
pub mod sensor;
/// Watering status engine
pub mod status;
/// The tracker store
pub mod tracker;

pub use notification::{Notification, NotificationKind, Notifier};
pub use sensor::{MoistureSensor, SimulatedSensor};
pub use status::{PlantStatus, Urgency};
pub use tracker::PlantTracker;

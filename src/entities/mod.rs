//! Entity module - `SeaORM` entity definitions for the `SQLite` backend.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod plant;

pub use plant::{Column as PlantColumn, Entity as PlantEntity, Model as PlantModel};

//! Plant entity - One row per tracked plant.
//!
//! `position` keeps the collection order across save and load. Numeric fields
//! are stored as plain integers and range-checked when converted back into a
//! [`crate::models::Plant`].

// Aliased: the entity derive expands to code naming `Result` and `Error`.
use crate::errors::{Error as CrateError, Result as CrateResult};
use crate::models::Plant;
use sea_orm::{Set, entity::prelude::*};
use serde::{Deserialize, Serialize};

/// Plant database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "plants")]
pub struct Model {
    /// Opaque plant identifier
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Index of the plant within the collection
    pub position: i32,
    /// Display name
    pub name: String,
    /// Species or category label
    pub plant_type: String,
    /// Time of the last watering
    pub last_watered: DateTimeUtc,
    /// Watering interval in days
    pub watering_frequency: i32,
    /// Display image URI
    pub image: String,
    /// Soil moisture, 0-100
    pub moisture_level: i32,
    /// Moisture threshold, 0-100
    pub moisture_threshold: i32,
    /// Time of the last moisture update
    pub last_moisture_reading: DateTimeUtc,
}

/// Plants have no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn column_value<T: TryFrom<i32>>(value: i32, column: &str, id: &str) -> CrateResult<T> {
    T::try_from(value).map_err(|_| CrateError::Storage {
        message: format!("Plant {id} has {column} {value} outside the stored range"),
    })
}

impl TryFrom<Model> for Plant {
    type Error = CrateError;

    fn try_from(model: Model) -> CrateResult<Self> {
        let plant = Self {
            watering_frequency: column_value(
                model.watering_frequency,
                "watering_frequency",
                &model.id,
            )?,
            moisture_level: column_value(model.moisture_level, "moisture_level", &model.id)?,
            moisture_threshold: column_value(
                model.moisture_threshold,
                "moisture_threshold",
                &model.id,
            )?,
            id: model.id,
            name: model.name,
            plant_type: model.plant_type,
            last_watered: model.last_watered,
            image: model.image,
            last_moisture_reading: model.last_moisture_reading,
        };
        plant.check_stored()?;
        Ok(plant)
    }
}

/// Builds the row for `plant` at `position` in the collection.
pub fn to_active_model(plant: &Plant, position: usize) -> CrateResult<ActiveModel> {
    let position = i32::try_from(position).map_err(|_| CrateError::Storage {
        message: format!("Collection too large to store position {position}"),
    })?;
    let watering_frequency = i32::try_from(plant.watering_frequency).map_err(|_| CrateError::Storage {
        message: format!(
            "Plant {} has watering frequency {} beyond the storable range",
            plant.id, plant.watering_frequency
        ),
    })?;

    Ok(ActiveModel {
        id: Set(plant.id.clone()),
        position: Set(position),
        name: Set(plant.name.clone()),
        plant_type: Set(plant.plant_type.clone()),
        last_watered: Set(plant.last_watered),
        watering_frequency: Set(watering_frequency),
        image: Set(plant.image.clone()),
        moisture_level: Set(i32::from(plant.moisture_level)),
        moisture_threshold: Set(i32::from(plant.moisture_threshold)),
        last_moisture_reading: Set(plant.last_moisture_reading),
    })
}

use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors, maintenance};

/// Operational state shown on the vehicle overview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "kebab-case")]
pub enum VehicleStatus {
    #[default]
    #[sea_orm(string_value = "available")]
    Available,
    #[sea_orm(string_value = "in-use")]
    InUse,
    #[sea_orm(string_value = "maintenance")]
    Maintenance,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vehicle")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub brand: String,
    #[sea_orm(column_name = "model")]
    pub model_name: String,
    pub license_plate: String,
    pub mileage: i32,
    pub status: VehicleStatus,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Maintenance,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Maintenance => Entity::has_many(maintenance::Entity).into(),
        }
    }
}

impl Related<maintenance::Entity> for Entity {
    fn to() -> RelationDef { Relation::Maintenance.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_fields(brand: &str, model: &str, license_plate: &str, mileage: i32) -> Result<(), errors::ModelError> {
    if brand.trim().is_empty() { return Err(errors::ModelError::Validation("brand required".into())); }
    if model.trim().is_empty() { return Err(errors::ModelError::Validation("model required".into())); }
    if license_plate.trim().is_empty() { return Err(errors::ModelError::Validation("license plate required".into())); }
    if mileage < 0 { return Err(errors::ModelError::Validation("mileage must be >= 0".into())); }
    Ok(())
}

pub async fn create(
    db: &DatabaseConnection,
    brand: &str,
    model: &str,
    license_plate: &str,
    mileage: i32,
    status: VehicleStatus,
) -> Result<Model, errors::ModelError> {
    validate_fields(brand, model, license_plate, mileage)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        brand: Set(brand.trim().to_string()),
        model_name: Set(model.trim().to_string()),
        license_plate: Set(license_plate.trim().to_string()),
        mileage: Set(mileage),
        status: Set(status),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

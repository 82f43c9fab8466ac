use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use uuid::Uuid;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{errors, vehicle};

/// Calendar format accepted for maintenance dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Category of work performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "kebab-case")]
pub enum MaintenanceType {
    #[sea_orm(string_value = "inspection")]
    Inspection,
    #[sea_orm(string_value = "oil-change")]
    OilChange,
    #[sea_orm(string_value = "tire-change")]
    TireChange,
    #[sea_orm(string_value = "repair")]
    Repair,
    #[sea_orm(string_value = "other")]
    Other,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "maintenance")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub date: Date,
    pub maintenance_type: MaintenanceType,
    pub mileage: i32,
    #[sea_orm(column_type = "Double")]
    pub cost: f64,
    pub workshop: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Vehicle }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Vehicle => Entity::belongs_to(vehicle::Entity)
                .from(Column::VehicleId)
                .to(vehicle::Column::Id)
                .into(),
        }
    }
}

impl Related<vehicle::Entity> for Entity {
    fn to() -> RelationDef { Relation::Vehicle.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Column values for a new row; id and timestamps are assigned on insert.
#[derive(Clone, Debug)]
pub struct NewMaintenance {
    pub vehicle_id: Uuid,
    pub date: NaiveDate,
    pub maintenance_type: MaintenanceType,
    pub mileage: i32,
    pub cost: f64,
    pub workshop: Option<String>,
    pub notes: Option<String>,
}

/// Parse a `YYYY-MM-DD` date: four-digit year, two-digit month and day, no
/// sign or padding.
pub fn parse_date(raw: &str) -> Result<NaiveDate, errors::ModelError> {
    let invalid = || errors::ModelError::Validation("invalid date, expected YYYY-MM-DD".into());
    // chrono alone accepts space-padded fields and signed years
    let shaped = raw.len() == 10
        && raw.bytes().enumerate().all(|(i, b)| if i == 4 || i == 7 { b == b'-' } else { b.is_ascii_digit() });
    if !shaped {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| invalid())
}

pub fn validate_mileage(mileage: i32) -> Result<(), errors::ModelError> {
    if mileage < 0 { return Err(errors::ModelError::Validation("mileage must be >= 0".into())); }
    Ok(())
}

pub fn validate_cost(cost: f64) -> Result<(), errors::ModelError> {
    if !cost.is_finite() || cost < 0.0 {
        return Err(errors::ModelError::Validation("cost must be a non-negative number".into()));
    }
    Ok(())
}

pub async fn create(db: &DatabaseConnection, new: NewMaintenance) -> Result<Model, errors::ModelError> {
    validate_mileage(new.mileage)?;
    validate_cost(new.cost)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        vehicle_id: Set(new.vehicle_id),
        date: Set(new.date),
        maintenance_type: Set(new.maintenance_type),
        mileage: Set(new.mileage),
        cost: Set(new.cost),
        workshop: Set(new.workshop),
        notes: Set(new.notes),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

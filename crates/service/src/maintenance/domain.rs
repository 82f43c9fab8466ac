use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::vehicle::domain::Vehicle;

pub use models::maintenance::{MaintenanceType, NewMaintenance};

/// A recorded service, inspection or repair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceEntry {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: MaintenanceType,
    pub mileage: i32,
    pub cost: f64,
    pub workshop: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<models::maintenance::Model> for MaintenanceEntry {
    fn from(m: models::maintenance::Model) -> Self {
        Self {
            id: m.id,
            vehicle_id: m.vehicle_id,
            date: m.date,
            kind: m.maintenance_type,
            mileage: m.mileage,
            cost: m.cost,
            workshop: m.workshop,
            notes: m.notes,
            created_at: m.created_at.with_timezone(&Utc),
            updated_at: m.updated_at.with_timezone(&Utc),
        }
    }
}

/// Create/update payload. `vehicle_id` and `date` stay raw strings so the
/// service can report malformed values as validation errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceInput {
    pub vehicle_id: String,
    #[serde(default)]
    pub date: String,
    #[serde(rename = "type")]
    pub kind: MaintenanceType,
    pub mileage: i32,
    pub cost: f64,
    #[serde(default)]
    pub workshop: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Listing row: the entry plus its vehicle's display name (empty when unresolved).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceWithVehicle {
    #[serde(flatten)]
    pub entry: MaintenanceEntry,
    pub vehicle_name: String,
}

/// A vehicle together with its maintenance history.
#[derive(Debug, Clone, Serialize)]
pub struct VehicleMaintenance {
    pub vehicle: Vehicle,
    pub maintenance: Vec<MaintenanceEntry>,
}

/// A single entry and the vehicle it belongs to.
#[derive(Debug, Clone, Serialize)]
pub struct MaintenanceDetail {
    pub maintenance: MaintenanceEntry,
    pub vehicle: Vehicle,
}

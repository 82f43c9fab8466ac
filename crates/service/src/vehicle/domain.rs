use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use models::vehicle::VehicleStatus;

/// Domain vehicle (business view)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: Uuid,
    pub brand: String,
    pub model: String,
    pub license_plate: String,
    pub mileage: i32,
    pub status: VehicleStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vehicle {
    /// `"{brand} {model} ({license plate})"`, as shown next to maintenance entries.
    pub fn display_name(&self) -> String {
        format!("{} {} ({})", self.brand, self.model, self.license_plate)
    }
}

impl From<models::vehicle::Model> for Vehicle {
    fn from(m: models::vehicle::Model) -> Self {
        Self {
            id: m.id,
            brand: m.brand,
            model: m.model_name,
            license_plate: m.license_plate,
            mileage: m.mileage,
            status: m.status,
            created_at: m.created_at.with_timezone(&Utc),
            updated_at: m.updated_at.with_timezone(&Utc),
        }
    }
}

/// Registration input
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVehicle {
    pub brand: String,
    pub model: String,
    pub license_plate: String,
    #[serde(default)]
    pub mileage: i32,
    #[serde(default)]
    pub status: VehicleStatus,
}

//! Post-write hook keeping a vehicle's odometer in step with its maintenance log.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::errors::ServiceError;
use crate::vehicle::domain::Vehicle;
use crate::vehicle::repository::VehicleRepository;

/// Invoked after a maintenance entry has been persisted.
#[async_trait]
pub trait MileageSync: Send + Sync {
    /// Raise `vehicle`'s mileage to `reading` if the reading is higher.
    /// Returns whether the vehicle was changed.
    async fn record_reading(&self, vehicle: Vehicle, reading: i32) -> Result<bool, ServiceError>;
}

/// Writes raised readings back through the vehicle store.
pub struct VehicleMileageSync {
    vehicles: Arc<dyn VehicleRepository>,
}

impl VehicleMileageSync {
    pub fn new(vehicles: Arc<dyn VehicleRepository>) -> Self { Self { vehicles } }
}

#[async_trait]
impl MileageSync for VehicleMileageSync {
    async fn record_reading(&self, mut vehicle: Vehicle, reading: i32) -> Result<bool, ServiceError> {
        if reading <= vehicle.mileage {
            return Ok(false);
        }
        let previous = vehicle.mileage;
        vehicle.mileage = reading;
        self.vehicles.update(&vehicle).await?;
        debug!(vehicle_id = %vehicle.id, previous, current = reading, "vehicle_mileage_raised");
        Ok(true)
    }
}

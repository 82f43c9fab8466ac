use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use super::domain::{NewVehicle, Vehicle};
use super::repository::VehicleRepository;
use crate::errors::{storage_failure, ServiceError};

/// Listing and registration of fleet vehicles.
pub struct VehicleService {
    repo: Arc<dyn VehicleRepository>,
}

impl VehicleService {
    pub fn new(repo: Arc<dyn VehicleRepository>) -> Self { Self { repo } }

    pub async fn list(&self) -> Result<Vec<Vehicle>, ServiceError> {
        self.repo.list().await.map_err(storage_failure("failed to load vehicles"))
    }

    pub async fn get(&self, id: Uuid) -> Result<Vehicle, ServiceError> {
        self.repo
            .find(id)
            .await
            .map_err(storage_failure("failed to load vehicle"))?
            .ok_or_else(|| ServiceError::not_found("vehicle"))
    }

    #[instrument(skip(self, input), fields(license_plate = %input.license_plate))]
    pub async fn create(&self, input: NewVehicle) -> Result<Vehicle, ServiceError> {
        models::vehicle::validate_fields(&input.brand, &input.model, &input.license_plate, input.mileage)?;
        let vehicle = self
            .repo
            .create(input)
            .await
            .map_err(storage_failure("failed to create vehicle"))?;
        info!(vehicle_id = %vehicle.id, mileage = vehicle.mileage, "vehicle_created");
        Ok(vehicle)
    }
}

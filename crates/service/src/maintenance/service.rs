use std::collections::HashMap;
use std::sync::Arc;

use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use models::maintenance::{parse_date, validate_cost, validate_mileage};

use super::domain::{
    MaintenanceDetail, MaintenanceEntry, MaintenanceInput, MaintenanceWithVehicle, NewMaintenance, VehicleMaintenance,
};
use super::mileage::{MileageSync, VehicleMileageSync};
use super::repository::MaintenanceRepository;
use crate::errors::{storage_failure, ServiceError};
use crate::vehicle::domain::Vehicle;
use crate::vehicle::repository::VehicleRepository;

/// Application service for maintenance entries.
///
/// Validates vehicle references against the vehicle store, enriches listings with
/// vehicle names and, after every successful write, hands the reported mileage to
/// a [`MileageSync`] hook. Hook failures are logged and never fail the write.
pub struct MaintenanceService {
    entries: Arc<dyn MaintenanceRepository>,
    vehicles: Arc<dyn VehicleRepository>,
    mileage: Arc<dyn MileageSync>,
}

impl MaintenanceService {
    /// Build the service with the default [`VehicleMileageSync`] hook.
    pub fn new(entries: Arc<dyn MaintenanceRepository>, vehicles: Arc<dyn VehicleRepository>) -> Self {
        let mileage = Arc::new(VehicleMileageSync::new(Arc::clone(&vehicles)));
        Self { entries, vehicles, mileage }
    }

    /// Replace the post-write mileage hook.
    pub fn with_mileage_sync(mut self, mileage: Arc<dyn MileageSync>) -> Self {
        self.mileage = mileage;
        self
    }

    /// All entries, each with its vehicle's display name. Entries whose vehicle
    /// cannot be resolved keep an empty name.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<MaintenanceWithVehicle>, ServiceError> {
        let entries = self
            .entries
            .list()
            .await
            .map_err(storage_failure("failed to load maintenance entries"))?;

        let mut names: HashMap<Uuid, Option<String>> = HashMap::new();
        let mut rows = Vec::with_capacity(entries.len());
        for entry in entries {
            let name = match names.get(&entry.vehicle_id) {
                Some(known) => known.clone(),
                None => {
                    let resolved = self.vehicle_name(entry.vehicle_id).await;
                    names.insert(entry.vehicle_id, resolved.clone());
                    resolved
                }
            };
            rows.push(MaintenanceWithVehicle { entry, vehicle_name: name.unwrap_or_default() });
        }
        Ok(rows)
    }

    /// The vehicle and its entries. NotFound when the vehicle does not exist.
    #[instrument(skip(self))]
    pub async fn list_by_vehicle(&self, vehicle_id: Uuid) -> Result<VehicleMaintenance, ServiceError> {
        let vehicle = self.require_vehicle(vehicle_id).await?;
        let maintenance = self
            .entries
            .list_by_vehicle(vehicle_id)
            .await
            .map_err(storage_failure("failed to load maintenance entries"))?;
        Ok(VehicleMaintenance { vehicle, maintenance })
    }

    /// One entry with its vehicle. A missing vehicle here is an integrity fault.
    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> Result<MaintenanceDetail, ServiceError> {
        let maintenance = self.require_entry(id).await?;
        let vehicle = match self.vehicles.find(maintenance.vehicle_id).await {
            Ok(Some(vehicle)) => vehicle,
            Ok(None) => {
                error!(entry_id = %id, vehicle_id = %maintenance.vehicle_id, "maintenance entry references a missing vehicle");
                return Err(ServiceError::Integrity("vehicle not found".into()));
            }
            Err(e) => return Err(storage_failure("failed to load vehicle")(e)),
        };
        Ok(MaintenanceDetail { maintenance, vehicle })
    }

    /// Record a new entry.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::maintenance::{MaintenanceService, domain::{MaintenanceInput, MaintenanceType}};
    /// use service::maintenance::repository::mock::MockMaintenanceRepository;
    /// use service::vehicle::domain::{NewVehicle, VehicleStatus};
    /// use service::vehicle::repository::{VehicleRepository, mock::MockVehicleRepository};
    ///
    /// let vehicles = Arc::new(MockVehicleRepository::default());
    /// let car = tokio_test::block_on(vehicles.create(NewVehicle {
    ///     brand: "VW".into(), model: "Caddy".into(), license_plate: "B-FD 1".into(),
    ///     mileage: 10_000, status: VehicleStatus::Available,
    /// })).unwrap();
    /// let svc = MaintenanceService::new(Arc::new(MockMaintenanceRepository::default()), vehicles.clone());
    /// let entry = tokio_test::block_on(svc.create(MaintenanceInput {
    ///     vehicle_id: car.id.to_string(), date: "2024-04-02".into(), kind: MaintenanceType::OilChange,
    ///     mileage: 12_000, cost: 89.9, workshop: None, notes: None,
    /// })).unwrap();
    /// assert_eq!(entry.mileage, 12_000);
    /// let car = tokio_test::block_on(vehicles.find(car.id)).unwrap().unwrap();
    /// assert_eq!(car.mileage, 12_000);
    /// ```
    #[instrument(skip(self, input), fields(vehicle_id = %input.vehicle_id))]
    pub async fn create(&self, input: MaintenanceInput) -> Result<MaintenanceEntry, ServiceError> {
        let vehicle_id = parse_vehicle_id(&input.vehicle_id)?;
        let vehicle = self.require_vehicle(vehicle_id).await?;
        let date = parse_date(&input.date)?;
        validate_mileage(input.mileage)?;
        validate_cost(input.cost)?;

        let entry = self
            .entries
            .create(NewMaintenance {
                vehicle_id,
                date,
                maintenance_type: input.kind,
                mileage: input.mileage,
                cost: input.cost,
                workshop: input.workshop,
                notes: input.notes,
            })
            .await
            .map_err(storage_failure("failed to create maintenance entry"))?;
        info!(entry_id = %entry.id, vehicle_id = %vehicle_id, mileage = entry.mileage, "maintenance_entry_created");

        self.sync_mileage(vehicle, entry.mileage).await;
        Ok(entry)
    }

    /// Replace an entry's fields.
    ///
    /// The vehicle reference is re-validated only when it changes and the date only
    /// when a non-empty one is supplied. Type, mileage, cost, workshop and notes are
    /// always overwritten, so omitted optional fields are cleared.
    #[instrument(skip(self, input), fields(vehicle_id = %input.vehicle_id))]
    pub async fn update(&self, id: Uuid, input: MaintenanceInput) -> Result<MaintenanceEntry, ServiceError> {
        let mut entry = self.require_entry(id).await?;

        if input.vehicle_id != entry.vehicle_id.to_string() {
            let vehicle_id = parse_vehicle_id(&input.vehicle_id)?;
            self.require_vehicle(vehicle_id).await?;
            entry.vehicle_id = vehicle_id;
        }
        if !input.date.is_empty() {
            entry.date = parse_date(&input.date)?;
        }
        validate_mileage(input.mileage)?;
        validate_cost(input.cost)?;

        entry.kind = input.kind;
        entry.mileage = input.mileage;
        entry.cost = input.cost;
        entry.workshop = input.workshop;
        entry.notes = input.notes;

        let updated = self
            .entries
            .update(&entry)
            .await
            .map_err(storage_failure("failed to update maintenance entry"))?;
        info!(entry_id = %updated.id, vehicle_id = %updated.vehicle_id, mileage = updated.mileage, "maintenance_entry_updated");

        match self.vehicles.find(updated.vehicle_id).await {
            Ok(Some(vehicle)) => self.sync_mileage(vehicle, updated.mileage).await,
            Ok(None) => warn!(vehicle_id = %updated.vehicle_id, "vehicle vanished before mileage sync"),
            Err(e) => warn!(vehicle_id = %updated.vehicle_id, error = %e, "vehicle lookup for mileage sync failed"),
        }
        Ok(updated)
    }

    /// NotFound unless an entry with this id is stored.
    pub async fn ensure_exists(&self, id: Uuid) -> Result<(), ServiceError> {
        self.require_entry(id).await.map(|_| ())
    }

    /// Remove an entry. NotFound when it is not stored.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        self.require_entry(id).await?;
        let removed = self
            .entries
            .delete(id)
            .await
            .map_err(storage_failure("failed to delete maintenance entry"))?;
        if !removed {
            return Err(ServiceError::not_found("maintenance entry"));
        }
        info!(entry_id = %id, "maintenance_entry_deleted");
        Ok(())
    }

    async fn require_entry(&self, id: Uuid) -> Result<MaintenanceEntry, ServiceError> {
        self.entries
            .find(id)
            .await
            .map_err(storage_failure("failed to load maintenance entry"))?
            .ok_or_else(|| ServiceError::not_found("maintenance entry"))
    }

    async fn require_vehicle(&self, id: Uuid) -> Result<Vehicle, ServiceError> {
        self.vehicles
            .find(id)
            .await
            .map_err(storage_failure("failed to load vehicle"))?
            .ok_or_else(|| ServiceError::not_found("vehicle"))
    }

    async fn vehicle_name(&self, id: Uuid) -> Option<String> {
        match self.vehicles.find(id).await {
            Ok(found) => found.map(|v| v.display_name()),
            Err(e) => {
                warn!(vehicle_id = %id, error = %e, "vehicle lookup failed while listing maintenance");
                None
            }
        }
    }

    async fn sync_mileage(&self, vehicle: Vehicle, reading: i32) {
        let vehicle_id = vehicle.id;
        if let Err(e) = self.mileage.record_reading(vehicle, reading).await {
            warn!(%vehicle_id, reading, error = %e, "mileage sync failed; maintenance entry kept");
        }
    }
}

fn parse_vehicle_id(raw: &str) -> Result<Uuid, ServiceError> {
    Uuid::parse_str(raw).map_err(|_| ServiceError::Validation("invalid vehicle id".into()))
}

use async_trait::async_trait;
use uuid::Uuid;

use super::domain::{NewVehicle, Vehicle};
use crate::errors::ServiceError;

/// Repository abstraction for vehicle persistence.
#[async_trait]
pub trait VehicleRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Vehicle>, ServiceError>;
    async fn find(&self, id: Uuid) -> Result<Option<Vehicle>, ServiceError>;
    async fn create(&self, new: NewVehicle) -> Result<Vehicle, ServiceError>;
    async fn update(&self, vehicle: &Vehicle) -> Result<Vehicle, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Mutex, MutexGuard};

    use chrono::Utc;

    #[derive(Default)]
    pub struct MockVehicleRepository {
        vehicles: Mutex<Vec<Vehicle>>,
        fail_finds: AtomicBool,
        fail_updates: AtomicBool,
        update_calls: AtomicUsize,
    }

    impl MockVehicleRepository {
        /// Make every `find` return a store error.
        pub fn fail_finds(&self, on: bool) { self.fail_finds.store(on, Ordering::SeqCst); }

        /// Make every `update` return a store error.
        pub fn fail_updates(&self, on: bool) { self.fail_updates.store(on, Ordering::SeqCst); }

        /// Number of `update` calls seen, failed ones included.
        pub fn update_calls(&self) -> usize { self.update_calls.load(Ordering::SeqCst) }

        fn vehicles(&self) -> Result<MutexGuard<'_, Vec<Vehicle>>, ServiceError> {
            self.vehicles.lock().map_err(|_| ServiceError::Db("vehicle store poisoned".into()))
        }
    }

    #[async_trait]
    impl VehicleRepository for MockVehicleRepository {
        async fn list(&self) -> Result<Vec<Vehicle>, ServiceError> {
            Ok(self.vehicles()?.clone())
        }

        async fn find(&self, id: Uuid) -> Result<Option<Vehicle>, ServiceError> {
            if self.fail_finds.load(Ordering::SeqCst) {
                return Err(ServiceError::Db("vehicle lookup failed".into()));
            }
            Ok(self.vehicles()?.iter().find(|v| v.id == id).cloned())
        }

        async fn create(&self, new: NewVehicle) -> Result<Vehicle, ServiceError> {
            let now = Utc::now();
            let vehicle = Vehicle {
                id: Uuid::new_v4(),
                brand: new.brand,
                model: new.model,
                license_plate: new.license_plate,
                mileage: new.mileage,
                status: new.status,
                created_at: now,
                updated_at: now,
            };
            self.vehicles()?.push(vehicle.clone());
            Ok(vehicle)
        }

        async fn update(&self, vehicle: &Vehicle) -> Result<Vehicle, ServiceError> {
            self.update_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_updates.load(Ordering::SeqCst) {
                return Err(ServiceError::Db("vehicle update failed".into()));
            }
            let mut vehicles = self.vehicles()?;
            let slot = vehicles
                .iter_mut()
                .find(|v| v.id == vehicle.id)
                .ok_or_else(|| ServiceError::not_found("vehicle"))?;
            *slot = Vehicle { updated_at: Utc::now(), ..vehicle.clone() };
            Ok(slot.clone())
        }
    }
}

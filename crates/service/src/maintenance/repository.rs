use async_trait::async_trait;
use uuid::Uuid;

use super::domain::{MaintenanceEntry, NewMaintenance};
use crate::errors::ServiceError;

/// Repository abstraction for maintenance entries.
#[async_trait]
pub trait MaintenanceRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<MaintenanceEntry>, ServiceError>;
    async fn find(&self, id: Uuid) -> Result<Option<MaintenanceEntry>, ServiceError>;
    async fn list_by_vehicle(&self, vehicle_id: Uuid) -> Result<Vec<MaintenanceEntry>, ServiceError>;
    async fn create(&self, new: NewMaintenance) -> Result<MaintenanceEntry, ServiceError>;
    async fn update(&self, entry: &MaintenanceEntry) -> Result<MaintenanceEntry, ServiceError>;
    /// Returns whether a row was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Mutex, MutexGuard};

    use chrono::Utc;

    /// Keeps insertion order, which is also the listing order.
    #[derive(Default)]
    pub struct MockMaintenanceRepository {
        entries: Mutex<Vec<MaintenanceEntry>>,
        fail_writes: AtomicBool,
    }

    impl MockMaintenanceRepository {
        /// Make `create`, `update` and `delete` return a store error.
        pub fn fail_writes(&self, on: bool) { self.fail_writes.store(on, Ordering::SeqCst); }

        /// Store an entry as-is, bypassing any checks.
        pub fn seed(&self, entry: MaintenanceEntry) -> Result<(), ServiceError> {
            self.entries()?.push(entry);
            Ok(())
        }

        pub fn len(&self) -> usize {
            self.entries.lock().map(|e| e.len()).unwrap_or_default()
        }

        pub fn is_empty(&self) -> bool { self.len() == 0 }

        fn entries(&self) -> Result<MutexGuard<'_, Vec<MaintenanceEntry>>, ServiceError> {
            self.entries.lock().map_err(|_| ServiceError::Db("maintenance store poisoned".into()))
        }

        fn check_writable(&self) -> Result<(), ServiceError> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(ServiceError::Db("maintenance write failed".into()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl MaintenanceRepository for MockMaintenanceRepository {
        async fn list(&self) -> Result<Vec<MaintenanceEntry>, ServiceError> {
            Ok(self.entries()?.clone())
        }

        async fn find(&self, id: Uuid) -> Result<Option<MaintenanceEntry>, ServiceError> {
            Ok(self.entries()?.iter().find(|e| e.id == id).cloned())
        }

        async fn list_by_vehicle(&self, vehicle_id: Uuid) -> Result<Vec<MaintenanceEntry>, ServiceError> {
            Ok(self.entries()?.iter().filter(|e| e.vehicle_id == vehicle_id).cloned().collect())
        }

        async fn create(&self, new: NewMaintenance) -> Result<MaintenanceEntry, ServiceError> {
            self.check_writable()?;
            let now = Utc::now();
            let entry = MaintenanceEntry {
                id: Uuid::new_v4(),
                vehicle_id: new.vehicle_id,
                date: new.date,
                kind: new.maintenance_type,
                mileage: new.mileage,
                cost: new.cost,
                workshop: new.workshop,
                notes: new.notes,
                created_at: now,
                updated_at: now,
            };
            self.entries()?.push(entry.clone());
            Ok(entry)
        }

        async fn update(&self, entry: &MaintenanceEntry) -> Result<MaintenanceEntry, ServiceError> {
            self.check_writable()?;
            let mut entries = self.entries()?;
            let slot = entries
                .iter_mut()
                .find(|e| e.id == entry.id)
                .ok_or_else(|| ServiceError::not_found("maintenance entry"))?;
            *slot = MaintenanceEntry { updated_at: Utc::now(), ..entry.clone() };
            Ok(slot.clone())
        }

        async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
            self.check_writable()?;
            let mut entries = self.entries()?;
            let before = entries.len();
            entries.retain(|e| e.id != id);
            Ok(entries.len() != before)
        }
    }
}

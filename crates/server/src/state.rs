use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::maintenance::repo::seaorm::SeaOrmMaintenanceRepository;
use service::maintenance::repository::MaintenanceRepository;
use service::maintenance::MaintenanceService;
use service::vehicle::repo::seaorm::SeaOrmVehicleRepository;
use service::vehicle::repository::VehicleRepository;
use service::vehicle::VehicleService;

/// Shared handler state: the services behind the route table.
#[derive(Clone)]
pub struct ServerState {
    pub maintenance: Arc<MaintenanceService>,
    pub vehicles: Arc<VehicleService>,
}

impl ServerState {
    /// Wire both services over the given stores. The maintenance service gets the
    /// default mileage hook writing through `vehicles`.
    pub fn new(vehicles: Arc<dyn VehicleRepository>, entries: Arc<dyn MaintenanceRepository>) -> Self {
        Self {
            maintenance: Arc::new(MaintenanceService::new(entries, Arc::clone(&vehicles))),
            vehicles: Arc::new(VehicleService::new(vehicles)),
        }
    }

    pub fn with_database(db: DatabaseConnection) -> Self {
        let vehicles: Arc<dyn VehicleRepository> = Arc::new(SeaOrmVehicleRepository { db: db.clone() });
        let entries: Arc<dyn MaintenanceRepository> = Arc::new(SeaOrmMaintenanceRepository { db });
        Self::new(vehicles, entries)
    }
}

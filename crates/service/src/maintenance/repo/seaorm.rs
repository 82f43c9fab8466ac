use chrono::Utc;
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set, Unchanged},
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::maintenance::domain::{MaintenanceEntry, NewMaintenance};
use crate::maintenance::repository::MaintenanceRepository;

use models::maintenance;

/// SeaORM-backed repository implementation. Listings are newest date first.
pub struct SeaOrmMaintenanceRepository {
    pub db: DatabaseConnection,
}

fn db_err(e: DbErr) -> ServiceError { ServiceError::Db(e.to_string()) }

#[async_trait::async_trait]
impl MaintenanceRepository for SeaOrmMaintenanceRepository {
    async fn list(&self) -> Result<Vec<MaintenanceEntry>, ServiceError> {
        let rows = maintenance::Entity::find()
            .order_by_desc(maintenance::Column::Date)
            .order_by_desc(maintenance::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(MaintenanceEntry::from).collect())
    }

    async fn find(&self, id: Uuid) -> Result<Option<MaintenanceEntry>, ServiceError> {
        let row = maintenance::Entity::find_by_id(id).one(&self.db).await.map_err(db_err)?;
        Ok(row.map(MaintenanceEntry::from))
    }

    async fn list_by_vehicle(&self, vehicle_id: Uuid) -> Result<Vec<MaintenanceEntry>, ServiceError> {
        let rows = maintenance::Entity::find()
            .filter(maintenance::Column::VehicleId.eq(vehicle_id))
            .order_by_desc(maintenance::Column::Date)
            .order_by_desc(maintenance::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(MaintenanceEntry::from).collect())
    }

    async fn create(&self, new: NewMaintenance) -> Result<MaintenanceEntry, ServiceError> {
        let created = maintenance::create(&self.db, new).await?;
        Ok(created.into())
    }

    async fn update(&self, e: &MaintenanceEntry) -> Result<MaintenanceEntry, ServiceError> {
        let am = maintenance::ActiveModel {
            id: Unchanged(e.id),
            vehicle_id: Set(e.vehicle_id),
            date: Set(e.date),
            maintenance_type: Set(e.kind),
            mileage: Set(e.mileage),
            cost: Set(e.cost),
            workshop: Set(e.workshop.clone()),
            notes: Set(e.notes.clone()),
            created_at: NotSet,
            updated_at: Set(Utc::now().into()),
        };
        match am.update(&self.db).await {
            Ok(m) => Ok(m.into()),
            Err(DbErr::RecordNotUpdated) => Err(ServiceError::not_found("maintenance entry")),
            Err(err) => Err(db_err(err)),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        let res = maintenance::Entity::delete_by_id(id).exec(&self.db).await.map_err(db_err)?;
        Ok(res.rows_affected > 0)
    }
}

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set, Unchanged},
    DatabaseConnection, DbErr, EntityTrait, QueryOrder,
};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::vehicle::domain::{NewVehicle, Vehicle};
use crate::vehicle::repository::VehicleRepository;

use models::vehicle;

/// SeaORM-backed repository implementation.
pub struct SeaOrmVehicleRepository {
    pub db: DatabaseConnection,
}

fn db_err(e: DbErr) -> ServiceError { ServiceError::Db(e.to_string()) }

#[async_trait::async_trait]
impl VehicleRepository for SeaOrmVehicleRepository {
    async fn list(&self) -> Result<Vec<Vehicle>, ServiceError> {
        let rows = vehicle::Entity::find()
            .order_by_asc(vehicle::Column::Brand)
            .order_by_asc(vehicle::Column::ModelName)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Vehicle::from).collect())
    }

    async fn find(&self, id: Uuid) -> Result<Option<Vehicle>, ServiceError> {
        let row = vehicle::Entity::find_by_id(id).one(&self.db).await.map_err(db_err)?;
        Ok(row.map(Vehicle::from))
    }

    async fn create(&self, new: NewVehicle) -> Result<Vehicle, ServiceError> {
        let created = vehicle::create(&self.db, &new.brand, &new.model, &new.license_plate, new.mileage, new.status).await?;
        Ok(created.into())
    }

    async fn update(&self, v: &Vehicle) -> Result<Vehicle, ServiceError> {
        let am = vehicle::ActiveModel {
            id: Unchanged(v.id),
            brand: Set(v.brand.clone()),
            model_name: Set(v.model.clone()),
            license_plate: Set(v.license_plate.clone()),
            mileage: Set(v.mileage),
            status: Set(v.status),
            created_at: NotSet,
            updated_at: Set(Utc::now().into()),
        };
        match am.update(&self.db).await {
            Ok(m) => Ok(m.into()),
            Err(DbErr::RecordNotUpdated) => Err(ServiceError::not_found("vehicle")),
            Err(e) => Err(db_err(e)),
        }
    }
}

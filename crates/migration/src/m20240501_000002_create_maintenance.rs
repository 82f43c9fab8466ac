//! Create `maintenance` table.
//! One row per service, inspection or repair performed on a vehicle.
//!
//! `vehicle_id` carries no foreign key: vehicle references are validated by the
//! service layer when entries are written.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Maintenance::Table)
                    .if_not_exists()
                    .col(uuid(Maintenance::Id).primary_key())
                    .col(uuid(Maintenance::VehicleId).not_null())
                    .col(date(Maintenance::Date).not_null())
                    .col(string_len(Maintenance::MaintenanceType, 32).not_null())
                    .col(integer(Maintenance::Mileage).not_null())
                    .col(double(Maintenance::Cost).not_null())
                    .col(
                        ColumnDef::new(Maintenance::Workshop)
                            .string_len(256)
                            .null(),
                    )
                    .col(ColumnDef::new(Maintenance::Notes).text().null())
                    .col(timestamp_with_time_zone(Maintenance::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Maintenance::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Maintenance::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Maintenance {
    Table,
    Id,
    VehicleId,
    Date,
    MaintenanceType,
    Mileage,
    Cost,
    Workshop,
    Notes,
    CreatedAt,
    UpdatedAt,
}

//! Create `vehicle` table.
//!
//! Fleet vehicles with their current odometer reading.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Vehicle::Table)
                    .if_not_exists()
                    .col(uuid(Vehicle::Id).primary_key())
                    .col(string_len(Vehicle::Brand, 64).not_null())
                    .col(string_len(Vehicle::Model, 64).not_null())
                    .col(string_len(Vehicle::LicensePlate, 32).unique_key().not_null())
                    .col(integer(Vehicle::Mileage).not_null().default(0))
                    .col(string_len(Vehicle::Status, 32).not_null().default("available"))
                    .col(timestamp_with_time_zone(Vehicle::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Vehicle::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Vehicle::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Vehicle { Table, Id, Brand, Model, LicensePlate, Mileage, Status, CreatedAt, UpdatedAt }

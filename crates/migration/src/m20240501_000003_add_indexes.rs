use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Maintenance: per-vehicle history lookups
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_maintenance_vehicle")
                    .table(Maintenance::Table)
                    .col(Maintenance::VehicleId)
                    .to_owned(),
            )
            .await?;

        // Maintenance: newest-first listing
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_maintenance_date")
                    .table(Maintenance::Table)
                    .col(Maintenance::Date)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_maintenance_date").table(Maintenance::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_maintenance_vehicle").table(Maintenance::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Maintenance { Table, VehicleId, Date }

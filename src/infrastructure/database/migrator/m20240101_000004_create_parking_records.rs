//! Migration to create parking_records table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ParkingRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ParkingRecords::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ParkingRecords::PlateNumber)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ParkingRecords::SlotNumber)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ParkingRecords::EntryTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ParkingRecords::ExitTime)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ParkingRecords::DurationHours)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ParkingRecords::AmountPaid)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ParkingRecords::IsPaid)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(ParkingRecords::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ParkingRecords::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Report queries filter on entry window and closure.
        manager
            .create_index(
                Index::create()
                    .name("idx_parking_records_entry_time")
                    .table(ParkingRecords::Table)
                    .col(ParkingRecords::EntryTime)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_parking_records_exit_time")
                    .table(ParkingRecords::Table)
                    .col(ParkingRecords::ExitTime)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ParkingRecords::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ParkingRecords {
    Table,
    Id,
    PlateNumber,
    SlotNumber,
    EntryTime,
    ExitTime,
    DurationHours,
    AmountPaid,
    IsPaid,
    CreatedAt,
    UpdatedAt,
}

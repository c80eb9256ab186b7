//! Create `stores` table with FK to `users` (owner).
//!
//! The image blob and its metadata live inline on the row.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Stores::Table)
                    .if_not_exists()
                    .col(pk_auto(Stores::Id))
                    .col(string_len(Stores::Name, 255).not_null())
                    .col(text(Stores::Description).not_null())
                    .col(string_len(Stores::Address, 512).not_null())
                    .col(string_len(Stores::Phone, 16).not_null())
                    .col(ColumnDef::new(Stores::ImageName).string_len(255).null())
                    .col(ColumnDef::new(Stores::ImageType).string_len(128).null())
                    .col(ColumnDef::new(Stores::Image).blob().null())
                    .col(ColumnDef::new(Stores::OpenTime).time().null())
                    .col(ColumnDef::new(Stores::CloseTime).time().null())
                    .col(string_len(Stores::Status, 32).not_null())
                    .col(integer(Stores::OwnerId).not_null())
                    .col(timestamp_with_time_zone(Stores::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Stores::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_store_owner")
                            .from(Stores::Table, Stores::OwnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Stores::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Stores {
    Table,
    Id,
    Name,
    Description,
    Address,
    Phone,
    ImageName,
    ImageType,
    Image,
    OpenTime,
    CloseTime,
    Status,
    OwnerId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users { Table, Id }

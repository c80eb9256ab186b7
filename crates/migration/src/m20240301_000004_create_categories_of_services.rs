//! Create `categories_of_services` table; carries an inline image like `stores`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CategoriesOfServices::Table)
                    .if_not_exists()
                    .col(pk_auto(CategoriesOfServices::Id))
                    .col(string_len(CategoriesOfServices::Name, 255).not_null())
                    .col(ColumnDef::new(CategoriesOfServices::ImageName).string_len(255).null())
                    .col(ColumnDef::new(CategoriesOfServices::ImageType).string_len(128).null())
                    .col(ColumnDef::new(CategoriesOfServices::Image).blob().null())
                    .col(string_len(CategoriesOfServices::Status, 32).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(CategoriesOfServices::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum CategoriesOfServices { Table, Id, Name, ImageName, ImageType, Image, Status }

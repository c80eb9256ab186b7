use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Stores: index on owner_id
        manager
            .create_index(
                Index::create()
                    .name("idx_store_owner")
                    .table(Stores::Table)
                    .col(Stores::OwnerId)
                    .to_owned(),
            )
            .await?;

        // Orders: lookups by user id
        manager
            .create_index(
                Index::create()
                    .name("idx_order_user")
                    .table(Orders::Table)
                    .col(Orders::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_order_item_order")
                    .table(OrderItems::Table)
                    .col(OrderItems::OrderId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_store_owner").table(Stores::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_order_user").table(Orders::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_order_item_order").table(OrderItems::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Stores { Table, OwnerId }

#[derive(DeriveIden)]
enum Orders { Table, UserId }

#[derive(DeriveIden)]
enum OrderItems { Table, OrderId }

//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240301_000001_create_users;
mod m20240301_000002_create_stores;
mod m20240301_000003_create_categories;
mod m20240301_000004_create_categories_of_services;
mod m20240301_000005_create_orders;
mod m20240301_000006_create_order_items;
mod m20240301_000007_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_users::Migration),
            Box::new(m20240301_000002_create_stores::Migration),
            Box::new(m20240301_000003_create_categories::Migration),
            Box::new(m20240301_000004_create_categories_of_services::Migration),
            Box::new(m20240301_000005_create_orders::Migration),
            Box::new(m20240301_000006_create_order_items::Migration),
            // Indexes should always be applied last
            Box::new(m20240301_000007_add_indexes::Migration),
        ]
    }
}

//! SeaORM database migrations.

pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_documents;
mod m20260301_000002_create_items;
mod m20260301_000003_create_fmea_items;
mod m20260301_000004_create_cp_items;
mod m20260301_000005_create_associations;
mod m20260301_000006_create_fmea_fe_items;
mod m20260301_000007_create_item_history;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_documents::Migration),
            Box::new(m20260301_000002_create_items::Migration),
            Box::new(m20260301_000003_create_fmea_items::Migration),
            Box::new(m20260301_000004_create_cp_items::Migration),
            Box::new(m20260301_000005_create_associations::Migration),
            Box::new(m20260301_000006_create_fmea_fe_items::Migration),
            Box::new(m20260301_000007_create_item_history::Migration),
        ]
    }
}

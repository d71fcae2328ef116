pub use sea_orm_migration::prelude::*;

pub mod entities;
mod m20250601_000001_create_leads;
mod m20250601_000002_create_reviews;
mod m20250614_000001_create_stores;
mod m20250621_000001_create_traffic_logs;
mod m20250705_000001_create_inquiries;
mod m20250705_000002_create_events;
mod m20250719_000001_create_recipes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_leads::Migration),
            Box::new(m20250601_000002_create_reviews::Migration),
            Box::new(m20250614_000001_create_stores::Migration),
            Box::new(m20250621_000001_create_traffic_logs::Migration),
            Box::new(m20250705_000001_create_inquiries::Migration),
            Box::new(m20250705_000002_create_events::Migration),
            Box::new(m20250719_000001_create_recipes::Migration),
        ]
    }
}

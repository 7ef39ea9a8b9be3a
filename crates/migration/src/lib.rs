//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_location;
mod m20240101_000002_create_barber;
mod m20240101_000003_create_client;
mod m20240101_000004_create_service;
mod m20240101_000005_create_appointment;
mod m20240101_000006_create_payment;
mod m20240101_000010_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_location::Migration),
            Box::new(m20240101_000002_create_barber::Migration),
            Box::new(m20240101_000003_create_client::Migration),
            Box::new(m20240101_000004_create_service::Migration),
            Box::new(m20240101_000005_create_appointment::Migration),
            Box::new(m20240101_000006_create_payment::Migration),
            // Indexes should always be applied last
            Box::new(m20240101_000010_add_indexes::Migration),
        ]
    }
}

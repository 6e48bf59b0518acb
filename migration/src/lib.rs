pub use sea_orm_migration::prelude::*;

mod m20260101_000001_create_fleet_and_orders;
mod m20260108_000001_add_bookings;
mod m20260115_000001_add_contacts_and_admins;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260101_000001_create_fleet_and_orders::Migration),
            Box::new(m20260108_000001_add_bookings::Migration),
            Box::new(m20260115_000001_add_contacts_and_admins::Migration),
        ]
    }
}

pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_user_table;
mod m20260301_000002_create_user_skill_table;
mod m20260301_000003_create_availability_table;
mod m20260301_000004_create_session_table;
mod m20260301_000005_create_ticket_table;
mod m20260301_000006_create_ticket_comment_table;
mod m20260301_000007_create_notification_table;
mod m20260301_000008_create_user_address_table;
mod m20260301_000009_create_verification_document_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_user_table::Migration),
            Box::new(m20260301_000002_create_user_skill_table::Migration),
            Box::new(m20260301_000003_create_availability_table::Migration),
            Box::new(m20260301_000004_create_session_table::Migration),
            Box::new(m20260301_000005_create_ticket_table::Migration),
            Box::new(m20260301_000006_create_ticket_comment_table::Migration),
            Box::new(m20260301_000007_create_notification_table::Migration),
            Box::new(m20260301_000008_create_user_address_table::Migration),
            Box::new(m20260301_000009_create_verification_document_table::Migration),
        ]
    }
}

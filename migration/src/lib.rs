pub use sea_orm_migration::prelude::*;

mod m20251101_000001_account;
mod m20251101_000002_eve_alliance;
mod m20251101_000003_eve_corporation;
mod m20251101_000004_eve_character;
mod m20251101_000005_eve_credential;
mod m20251101_000006_eve_character_credential;
mod m20251101_000007_account_duplicate;
mod m20251101_000008_application_grant;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251101_000001_account::Migration),
            Box::new(m20251101_000002_eve_alliance::Migration),
            Box::new(m20251101_000003_eve_corporation::Migration),
            Box::new(m20251101_000004_eve_character::Migration),
            Box::new(m20251101_000005_eve_credential::Migration),
            Box::new(m20251101_000006_eve_character_credential::Migration),
            Box::new(m20251101_000007_account_duplicate::Migration),
            Box::new(m20251101_000008_application_grant::Migration),
        ]
    }
}

pub use sea_orm_migration::prelude::*;

mod m20251017_000001_killmail;
mod m20251017_000002_battle;
mod m20251017_000003_killmail_battle;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251017_000001_killmail::Migration),
            Box::new(m20251017_000002_battle::Migration),
            Box::new(m20251017_000003_killmail_battle::Migration),
        ]
    }
}

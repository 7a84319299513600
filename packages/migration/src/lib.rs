pub use sea_orm_migration::prelude::*;
pub use sea_orm_migration::sea_orm::{DatabaseConnection, DbErr};

mod m20260823_000001_init;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20260823_000001_init::Migration)]
    }
}

/// Apply all pending migrations.
///
/// Used by the backend at startup and by tests that need a schema.
pub async fn migrate_up(db: &DatabaseConnection) -> Result<(), DbErr> {
    let before = count_applied_migrations(db).await.unwrap_or(0);
    tracing::info!(
        "running migrations: {} defined, {} applied",
        Migrator::migrations().len(),
        before
    );
    Migrator::up(db, None).await?;
    tracing::info!("migrations up to date");
    Ok(())
}

/// Count the number of migrations that have been applied to the database.
/// Returns 0 if the migration table doesn't exist yet.
pub async fn count_applied_migrations(db: &DatabaseConnection) -> Result<usize, DbErr> {
    match Migrator::get_applied_migrations(db).await {
        Ok(migrations) => Ok(migrations.len()),
        Err(DbErr::Exec(_)) => Ok(0),
        Err(e) => Err(e),
    }
}

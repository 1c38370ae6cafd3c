use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection, DbErr};
use tracing::info;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://phase10.db?mode=rwc";

pub async fn connect_to(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    info!("Connecting to snapshot database at {}", database_url);
    Database::connect(database_url).await
}

pub async fn connect_to_memory_database() -> Result<DatabaseConnection, DbErr> {
    Database::connect("sqlite::memory:").await
}

/// Connects and brings the schema up to date.
pub async fn connect_and_migrate(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = connect_to(database_url).await?;
    Migrator::up(&db, None).await?;
    info!("Snapshot database migrations applied");
    Ok(db)
}

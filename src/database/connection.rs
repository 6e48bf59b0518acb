use crate::config::DatabaseConfig;
use crate::error::AppResult;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

pub type DbPool = DatabaseConnection;

pub async fn create_pool(config: &DatabaseConfig) -> AppResult<DbPool> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .sqlx_logging(true)
        .sqlx_logging_level(log::LevelFilter::Debug);

    let pool = Database::connect(options).await?;
    log::info!("Database connected (max_connections={})", config.max_connections);
    Ok(pool)
}

pub async fn run_migrations(pool: &DbPool) -> AppResult<()> {
    let pending = Migrator::get_pending_migrations(pool).await?.len();
    Migrator::up(pool, None).await?;
    log::info!("Applied {pending} pending migration(s)");
    Ok(())
}

//! Database connection pool and schema migrations

use sqlx::{migrate::Migrator, postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use tracing::{error, info};

use todo_core::error::DomainError;
use todo_shared::config::DatabaseSettings;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

pub async fn create_pool(settings: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(Duration::from_secs(3))
        .connect(&settings.url)
        .await
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), DomainError> {
    info!("Running database migrations...");
    MIGRATOR.run(pool).await.map_err(|e| {
        error!("Migration failed: {}", e);
        DomainError::DatabaseError(e.to_string())
    })?;
    info!("Database migrations applied.");
    Ok(())
}

//! Shared infrastructure for Aviary services
//!
//! Database pool construction and schema migrations, used by the API
//! server binary and by any future background workers.

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};

/// Embedded migrations, applied with [`run_migrations`].
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Create the connection pool used for regular query traffic.
pub async fn create_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Run all pending migrations against the given pool.
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    tracing::info!("Running database migrations...");
    MIGRATOR.run(pool).await?;
    tracing::info!("Database migrations complete");
    Ok(())
}

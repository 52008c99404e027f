//! Data access layer for the kinotek catalog.
//!
//! Owns the PostgreSQL connection pool and exposes the actor and movie
//! repositories. All storage-engine failures are translated into
//! [`kinotek_core::error::CatalogError`] kinds before they leave this
//! crate.

pub mod error;
pub mod models;
pub mod repositories;

use std::future::Future;
use std::time::Duration;

use kinotek_core::error::CatalogError;
use sqlx::postgres::PgPoolOptions;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Verify the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}

/// Run a repository call under a deadline.
///
/// When the deadline fires the future is dropped mid-flight; a transaction
/// it held rolls back on drop, so a cancelled multi-statement write leaves
/// no partial state behind.
pub async fn with_timeout<T>(
    deadline: Duration,
    fut: impl Future<Output = Result<T, CatalogError>>,
) -> Result<T, CatalogError> {
    match tokio::time::timeout(deadline, fut).await {
        Ok(res) => res,
        Err(_) => Err(CatalogError::Cancelled),
    }
}

pub mod accounts;
pub mod listings;
pub mod models;
pub mod profiles;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use thiserror::Error;

use crate::config::DatabaseConfig;

/// Errors from the persistence layer. `NotFound` is reported distinctly so
/// handlers can surface it; everything else collapses to a transport error.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();

/// Build a lazily-connecting pool from config. Connections are established on
/// first use, so startup does not require the database to be reachable.
pub fn build_pool(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_lazy(&config.url)?;
    Ok(pool)
}

/// Ping the database to confirm connectivity.
pub async fn health_check(pool: &PgPool) -> Result<(), DatabaseError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

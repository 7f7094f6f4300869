use sqlx::PgPool;

use crate::config::AppConfig;

/// Shared application state, constructed once in `main` and injected into
/// every handler. No ambient singletons: the pool and config travel together.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(pool: PgPool, config: AppConfig) -> Self {
        Self { pool, config }
    }
}

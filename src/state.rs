use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AppConfig;

/// Shared application context handed to every handler through axum `State`.
///
/// Holds the store handle and configuration explicitly instead of module-level
/// globals; cloning is cheap (pool handle + Arc).
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(pool: PgPool, config: AppConfig) -> Self {
        Self {
            pool,
            config: Arc::new(config),
        }
    }
}

//! Application state

use crate::core::Config;
use crate::db::DbService;
use shared::error::AppResult;

/// Shared application state, cloned into every handler
#[derive(Clone)]
pub struct AppState {
    /// SQLite access (pool + migrations)
    pub db: DbService,
    /// Loaded configuration
    pub config: Config,
}

impl AppState {
    pub async fn new(config: &Config) -> AppResult<Self> {
        let db = DbService::new(&config.database_path).await?;
        Ok(Self {
            db,
            config: config.clone(),
        })
    }
}

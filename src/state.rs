//! # Application State
//!
//! The shared state every request handler receives through axum's `State`
//! extractor. The connection pool is created once at startup and cloned into
//! each request; there is no global database handle.

use crate::config::Config;
use anyhow::Result;
use sqlx::sqlite::SqlitePool;

/// Shared application state
///
/// `SqlitePool` is a cheap handle around a reference-counted pool, so
/// deriving `Clone` is all axum needs.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool holding the accounts table
    pub db: SqlitePool,
}

impl AppState {
    /// Initialize application state
    ///
    /// Connects to the configured database and applies the embedded
    /// migrations from `./migrations`.
    ///
    /// # Errors
    /// Returns an error if the connection or a migration fails.
    pub async fn new(config: &Config) -> Result<Self> {
        let db = SqlitePool::connect(&config.database_url).await?;
        Self::with_pool(db).await
    }

    /// Wrap an existing pool, running migrations on it first
    pub async fn with_pool(db: SqlitePool) -> Result<Self> {
        sqlx::migrate!("./migrations").run(&db).await?;

        Ok(AppState { db })
    }

    /// Fresh, migrated in-memory database for tests
    ///
    /// Every SQLite connection to `:memory:` opens its own database, so the
    /// pool is pinned to a single connection that never expires.
    #[cfg(test)]
    pub async fn in_memory() -> Result<Self> {
        let db = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None::<std::time::Duration>)
            .max_lifetime(None::<std::time::Duration>)
            .connect("sqlite::memory:")
            .await?;

        Self::with_pool(db).await
    }
}

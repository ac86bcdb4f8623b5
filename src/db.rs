//! Process-wide handle to the Postgres store.
//!
//! Built once in `app::run`, cloned into `AppState`, closed on shutdown.
//! The pool is created lazily so construction does no I/O; `connect()` is the
//! explicit startup step that proves the store is reachable.

use std::str::FromStr;

use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use thiserror::Error;

use crate::config::{AppEnv, DatabaseConfig};

/// Tables wiped by [`Database::clean_database`], dependents first.
#[cfg(test)]
const CLEAN_STATEMENTS: [&str; 2] = ["DELETE FROM bookmarks", "DELETE FROM users"];

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database url is empty")]
    MissingUrl,
    #[error("invalid database url")]
    InvalidUrl(#[source] sqlx::Error),
    #[error("store unavailable")]
    Unavailable(#[from] sqlx::Error),
    #[error("migration failed")]
    Migrate(#[from] sqlx::migrate::MigrateError),
    #[cfg(test)]
    #[error("clean_database is disabled in production")]
    CleanupForbidden,
}

#[derive(Clone, Debug)]
pub struct Database {
    pool: PgPool,
    app_env: AppEnv,
}

impl Database {
    /// Must be called from inside the tokio runtime: the pool spawns its
    /// maintenance task on creation.
    pub fn new(config: &DatabaseConfig, app_env: AppEnv) -> Result<Self, StoreError> {
        if config.url.trim().is_empty() {
            return Err(StoreError::MissingUrl);
        }

        let options = PgConnectOptions::from_str(&config.url).map_err(StoreError::InvalidUrl)?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.connect_timeout)
            .connect_lazy_with(options);

        Ok(Self { pool, app_env })
    }

    #[cfg(test)]
    pub fn from_pool(pool: PgPool, app_env: AppEnv) -> Self {
        Self { pool, app_env }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Open the first connection. Call once at startup; an error here means
    /// the process should not start serving.
    pub async fn connect(&self) -> Result<(), StoreError> {
        self.ping().await?;
        tracing::info!(
            max_connections = self.pool.options().get_max_connections(),
            app_env = ?self.app_env,
            "database connected"
        );
        Ok(())
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Delete every row of every known table in one transaction.
    ///
    /// Rows that reference users go first so no foreign key is violated
    /// midway. Any failure drops the transaction, which rolls it back, so
    /// callers never observe a partial clear. Not safe to run next to live
    /// request traffic; compiled only into test builds and refused outright
    /// in production.
    #[cfg(test)]
    pub async fn clean_database(&self) -> Result<u64, StoreError> {
        if self.app_env.is_production() {
            tracing::warn!("refusing to clean database in production");
            return Err(StoreError::CleanupForbidden);
        }

        let mut tx = self.pool.begin().await?;
        let mut deleted = 0;

        for statement in CLEAN_STATEMENTS {
            let result = sqlx::query(statement).execute(&mut *tx).await?;
            deleted += result.rows_affected();
        }

        tx.commit().await?;

        tracing::debug!(rows = deleted, "database cleaned");
        Ok(deleted)
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

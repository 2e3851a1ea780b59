//! SQLite connection pool management

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use yoga_agent_config::PersistenceConfig;

use crate::error::PersistenceError;
use crate::schema;

/// SQLite connection settings
#[derive(Debug, Clone)]
pub struct SqliteConfig {
    pub database_url: String,
    pub max_connections: u32,
}

impl SqliteConfig {
    /// Private in-memory database, for tests and throwaway runs.
    ///
    /// Every connection to `sqlite::memory:` opens a separate database,
    /// so the pool is capped at one connection.
    pub fn in_memory() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
        }
    }
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self::from(&PersistenceConfig::default())
    }
}

impl From<&PersistenceConfig> for SqliteConfig {
    fn from(config: &PersistenceConfig) -> Self {
        Self {
            database_url: config.database_url.clone(),
            max_connections: config.max_connections,
        }
    }
}

/// SQLite pool wrapper
#[derive(Clone)]
pub struct SqliteClient {
    pool: SqlitePool,
    config: SqliteConfig,
}

impl SqliteClient {
    /// Open (creating if missing) the database file
    pub async fn connect(config: SqliteConfig) -> Result<Self, PersistenceError> {
        tracing::info!(url = %config.database_url, "Connecting to SQLite");

        let options = SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections.max(1))
            .connect_with(options)
            .await?;

        Ok(Self { pool, config })
    }

    /// Ensure all tables exist
    pub async fn ensure_schema(&self) -> Result<(), PersistenceError> {
        schema::create_tables(&self.pool).await?;
        tracing::info!(url = %self.config.database_url, "Schema ensured");
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

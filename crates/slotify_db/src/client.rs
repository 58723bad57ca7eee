//! Database client for Slotify
//!
//! A thin wrapper over a `sqlx::Any` pool so the same repositories run on
//! SQLite, PostgreSQL or MySQL depending on the URL scheme.

use crate::error::DbError;
use slotify_config::{AppConfig, DatabaseConfig};
use sqlx::pool::PoolOptions;
use sqlx::{Pool, Transaction};
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

/// Type alias for a database transaction
pub type DbTransaction<'a> = Transaction<'a, sqlx::Any>;

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Database client for Slotify
#[derive(Debug, Clone)]
pub struct DbClient {
    pool: Pool<sqlx::Any>,
}

impl DbClient {
    /// Create a client from the `[database]` section of the application config.
    ///
    /// # Errors
    ///
    /// * The database configuration is missing
    /// * The database URL is empty
    /// * The database connection fails
    pub async fn new(config: &Arc<AppConfig>) -> Result<Self, DbError> {
        let db_config = config
            .database
            .as_ref()
            .ok_or_else(|| DbError::ConfigError("Database configuration is missing".to_string()))?;

        Self::from_config(db_config).await
    }

    /// Create a client from a database configuration.
    pub async fn from_config(db_config: &DatabaseConfig) -> Result<Self, DbError> {
        let db_url = &db_config.url;
        if db_url.is_empty() {
            return Err(DbError::ConfigError("Database URL is empty".to_string()));
        }

        let pool = Self::create_pool(db_url, db_config.max_connections).await?;
        Ok(Self { pool })
    }

    /// Create a client straight from a URL with default pool settings.
    pub async fn from_url(db_url: &str) -> Result<Self, DbError> {
        if db_url.is_empty() {
            return Err(DbError::UrlError("Database URL is empty".to_string()));
        }

        let pool = Self::create_pool(db_url, None).await?;
        Ok(Self { pool })
    }

    async fn create_pool(
        db_url: &str,
        max_connections: Option<u32>,
    ) -> Result<Pool<sqlx::Any>, DbError> {
        debug!("Creating database pool with URL: {}", db_url);

        // Register the compiled-in drivers with the "any" driver
        sqlx::any::install_default_drivers();

        let in_memory = db_url.contains(":memory:");

        // Every connection to an in-memory SQLite database is a fresh database,
        // so the pool is pinned to a single connection that never expires.
        let pool_options = if in_memory {
            PoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            PoolOptions::new()
                .max_connections(max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS))
                .acquire_timeout(Duration::from_secs(3))
                .idle_timeout(Duration::from_secs(600))
        };

        // AnyConnectOptions cannot set create_if_missing, so create the file up front
        if let Some(db_path) = sqlite_file_path(db_url) {
            let path = Path::new(db_path);
            if let Some(dir) = path.parent() {
                if !dir.as_os_str().is_empty() && !dir.exists() {
                    debug!("Creating directory for SQLite database: {:?}", dir);
                    std::fs::create_dir_all(dir).map_err(|e| {
                        error!("Failed to create directory for SQLite database: {}", e);
                        DbError::PoolError(format!("Failed to create directory: {}", e))
                    })?;
                }
            }

            if !path.exists() {
                debug!("Creating empty SQLite database file: {}", db_path);
                std::fs::File::create(path).map_err(|e| {
                    error!("Failed to create SQLite database file: {}", e);
                    DbError::PoolError(format!("Failed to create database file: {}", e))
                })?;
            }
        }

        let connect_options = sqlx::any::AnyConnectOptions::from_str(db_url)
            .map_err(|e| DbError::UrlError(e.to_string()))?;

        let pool = pool_options
            .connect_with(connect_options)
            .await
            .map_err(|e| {
                error!("Failed to create database pool: {}", e);
                DbError::PoolError(e.to_string())
            })?;

        info!("Database pool created successfully");
        Ok(pool)
    }

    /// Get the database connection pool
    pub fn pool(&self) -> &Pool<sqlx::Any> {
        &self.pool
    }

    /// Begin a transaction
    pub async fn begin(&self) -> Result<DbTransaction<'static>, DbError> {
        self.pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionError(e.to_string()))
    }

    /// Execute a statement that returns no rows, yielding the affected row count.
    pub async fn execute(&self, query: &str) -> Result<u64, DbError> {
        sqlx::query(query)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected())
            .map_err(DbError::from_query)
    }

    /// `SELECT 1` round trip.
    pub async fn is_healthy(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

impl std::fmt::Display for DbClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DbClient")
    }
}

/// File path of a file-backed SQLite URL, `None` for other schemes and `:memory:`.
fn sqlite_file_path(db_url: &str) -> Option<&str> {
    let rest = db_url
        .strip_prefix("sqlite://")
        .or_else(|| db_url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or(rest);
    if path.is_empty() || path.contains(":memory:") {
        None
    } else {
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_paths() {
        assert_eq!(sqlite_file_path("sqlite:data/slotify.db"), Some("data/slotify.db"));
        assert_eq!(sqlite_file_path("sqlite://data/slotify.db?mode=rwc"), Some("data/slotify.db"));
        assert_eq!(sqlite_file_path("sqlite::memory:"), None);
        assert_eq!(sqlite_file_path("postgres://localhost/slotify"), None);
    }

    #[tokio::test]
    async fn in_memory_client_is_healthy() {
        let client = DbClient::from_url("sqlite::memory:").await.unwrap();
        assert!(client.is_healthy().await);
        assert_eq!(
            client
                .execute("CREATE TABLE probe (id INTEGER PRIMARY KEY)")
                .await
                .unwrap(),
            0
        );
        // Same single connection, so the table is still there.
        client.execute("INSERT INTO probe (id) VALUES (1)").await.unwrap();
    }

    #[tokio::test]
    async fn empty_url_is_rejected() {
        assert!(matches!(DbClient::from_url("").await, Err(DbError::UrlError(_))));
    }
}

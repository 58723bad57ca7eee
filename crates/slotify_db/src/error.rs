//! Error types for the database client

use slotify_common::SlotifyError;
use thiserror::Error;

/// Errors that can occur when working with the database client
#[derive(Debug, Error)]
pub enum DbError {
    /// Error from SQLx
    #[error("Database error: {0}")]
    SqlxError(#[from] sqlx::Error),

    /// Error with the database configuration
    #[error("Database configuration error: {0}")]
    ConfigError(String),

    /// Error with database URL parsing
    #[error("Database URL error: {0}")]
    UrlError(String),

    /// Error with database pool creation
    #[error("Database pool error: {0}")]
    PoolError(String),

    /// Error with database query
    #[error("Database query error: {0}")]
    QueryError(String),

    /// Error with database transaction
    #[error("Database transaction error: {0}")]
    TransactionError(String),

    /// A unique key already exists
    #[error("Duplicate key: {0}")]
    Conflict(String),

    /// A stored value could not be turned back into a model
    #[error("Failed to decode {column}: {message}")]
    DecodeError { column: String, message: String },
}

impl DbError {
    /// Classify a failed statement, keeping unique violations apart.
    pub fn from_query(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                DbError::Conflict(db_err.message().to_string())
            }
            _ => DbError::QueryError(err.to_string()),
        }
    }

    pub fn decode(column: &str, message: impl ToString) -> Self {
        DbError::DecodeError {
            column: column.to_string(),
            message: message.to_string(),
        }
    }
}

impl From<DbError> for SlotifyError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Conflict(msg) => SlotifyError::ConflictError(msg),
            DbError::ConfigError(msg) => SlotifyError::ConfigError(msg),
            other => SlotifyError::DatabaseError(other.to_string()),
        }
    }
}

//! Error types for the database client

use thiserror::Error;

/// Errors that can occur when working with the database client
#[derive(Debug, Error)]
pub enum DbError {
    /// Error with the database configuration
    #[error("Database configuration error: {0}")]
    ConfigError(String),

    /// Error with database URL parsing
    #[error("Database URL error: {0}")]
    UrlError(String),

    /// Error with database pool creation
    #[error("Database pool error: {0}")]
    PoolError(String),

    /// The database could not be reached or a connection could not be acquired
    #[error("Database unavailable: {0}")]
    Unavailable(String),

    /// A write collided with a uniqueness constraint
    #[error("Unique constraint violated")]
    UniqueViolation,

    /// Error with a database query
    #[error("Database query error: {0}")]
    QueryError(String),

    /// A stored row could not be decoded into a domain value
    #[error("Failed to decode row: {0}")]
    DecodeError(String),
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                DbError::Unavailable(err.to_string())
            }
            sqlx::Error::Io(io) => DbError::Unavailable(io.to_string()),
            sqlx::Error::Database(db) if db.is_unique_violation() => DbError::UniqueViolation,
            other => DbError::QueryError(other.to_string()),
        }
    }
}

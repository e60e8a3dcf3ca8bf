//! Error types for the database client

use devstats_common::DevstatsError;
use thiserror::Error;

/// Errors that can occur when working with the registration store
#[derive(Debug, Error)]
pub enum DbError {
    /// Error from SQLx
    #[error("Database error: {0}")]
    SqlxError(#[from] sqlx::Error),

    /// Error with the database configuration
    #[error("Database configuration error: {0}")]
    ConfigError(String),

    /// Error with database pool creation or connection acquisition
    #[error("Database pool error: {0}")]
    PoolError(String),

    /// Error with database query
    #[error("Database query error: {0}")]
    QueryError(String),
}

impl DbError {
    /// Classifies a failed statement, keeping pool exhaustion and closed pools
    /// apart from genuine query failures.
    pub fn from_query(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                DbError::PoolError(err.to_string())
            }
            other => DbError::QueryError(other.to_string()),
        }
    }
}

/// Convert DbError to DevstatsError
impl From<DbError> for DevstatsError {
    fn from(err: DbError) -> Self {
        DevstatsError::DatabaseError(err.to_string())
    }
}

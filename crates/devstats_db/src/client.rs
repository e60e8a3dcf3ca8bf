//! Database client for the registration store
//!
//! This module provides a database client built on the SQLx `Any` driver.
//! Production deployments point it at Postgres; tests use in-memory SQLite.

use crate::error::DbError;
use devstats_config::DatabaseConfig;
use sqlx::any::AnyConnectOptions;
use sqlx::pool::PoolOptions;
use sqlx::{Any, Pool};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, error, info};

/// The database engine behind the pool.
///
/// Only needed where SQL dialects differ, which is schema bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Postgres,
    Sqlite,
}

impl Backend {
    /// Detects the backend from the URL scheme.
    pub fn from_url(db_url: &str) -> Result<Self, DbError> {
        if db_url.starts_with("postgres:") || db_url.starts_with("postgresql:") {
            Ok(Backend::Postgres)
        } else if db_url.starts_with("sqlite:") {
            Ok(Backend::Sqlite)
        } else {
            Err(DbError::ConfigError(
                "Database URL must use the postgres:// or sqlite: scheme".to_string(),
            ))
        }
    }
}

/// Database client for the registration store
///
/// Owns the connection pool. It is created once in `main`, cloned into the
/// repositories (the pool is reference counted) and closed on shutdown.
#[derive(Debug, Clone)]
pub struct DbClient {
    /// The database connection pool
    pool: Pool<Any>,
    backend: Backend,
}

impl DbClient {
    /// Create a new database client from a database configuration
    ///
    /// Pool limits come from the configuration: `max_connections`,
    /// `acquire_timeout_secs` and `idle_timeout_secs`. One connection is
    /// opened eagerly so that an unreachable store fails here.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    ///
    /// * The database URL cannot be built or has an unsupported scheme
    /// * The database connection fails
    pub async fn from_config(db_config: &DatabaseConfig) -> Result<Self, DbError> {
        let db_url = db_config
            .connection_url()
            .map_err(|e| DbError::ConfigError(e.to_string()))?;
        let backend = Backend::from_url(&db_url)?;

        let pool_options = PoolOptions::<Any>::new()
            .max_connections(db_config.max_connections)
            .acquire_timeout(Duration::from_secs(db_config.acquire_timeout_secs))
            .idle_timeout(Duration::from_secs(db_config.idle_timeout_secs));

        let pool = Self::create_pool(&db_url, backend, pool_options).await?;

        Ok(Self { pool, backend })
    }

    /// Create a connection pool
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    ///
    /// * The database URL is invalid
    /// * The database connection fails
    async fn create_pool(
        db_url: &str,
        backend: Backend,
        pool_options: PoolOptions<Any>,
    ) -> Result<Pool<Any>, DbError> {
        debug!(?backend, "Creating database pool");

        // Register the Postgres and SQLite drivers with the "any" driver
        sqlx::any::install_default_drivers();

        let connect_options = AnyConnectOptions::from_str(db_url)
            .map_err(|e| DbError::ConfigError(format!("Invalid database URL: {}", e)))?;

        let pool = pool_options
            .connect_with(connect_options)
            .await
            .map_err(|e| {
                error!(error = %e, ?backend, "Failed to create database pool");
                DbError::PoolError(e.to_string())
            })?;

        info!(?backend, "Database pool created successfully");
        Ok(pool)
    }

    /// Get the database connection pool
    pub fn pool(&self) -> &Pool<Any> {
        &self.pool
    }

    /// The backend detected from the connection URL
    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Execute a statement that returns no rows
    ///
    /// Returns the number of rows affected.
    pub async fn execute(&self, query: &str) -> Result<u64, DbError> {
        sqlx::query(query)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected())
            .map_err(DbError::from_query)
    }

    /// Check connectivity by acquiring a connection and running `SELECT 1`.
    pub async fn ping(&self) -> Result<(), DbError> {
        let mut conn = self.pool.acquire().await.map_err(DbError::from_query)?;
        sqlx::query("SELECT 1")
            .execute(&mut *conn)
            .await
            .map_err(DbError::from_query)?;
        Ok(())
    }

    /// Close every connection in the pool.
    ///
    /// Waits for checked-out connections to be returned. Statements issued
    /// afterwards fail with [`DbError::PoolError`].
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database connections closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_is_detected_from_scheme() {
        assert_eq!(
            Backend::from_url("postgres://u:p@localhost/db").unwrap(),
            Backend::Postgres
        );
        assert_eq!(
            Backend::from_url("postgresql://localhost/db").unwrap(),
            Backend::Postgres
        );
        assert_eq!(Backend::from_url("sqlite::memory:").unwrap(), Backend::Sqlite);
        assert!(Backend::from_url("mysql://localhost/db").is_err());
    }
}

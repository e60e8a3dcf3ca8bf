//! Registration store access for the device statistics services
//!
//! This crate wraps a SQLx `Any` pool. Deployments run against Postgres;
//! tests run the same queries against in-memory SQLite.
//!
//! # Example
//!
//! ```rust,no_run
//! use devstats_config::DatabaseConfig;
//! use devstats_db::{DbClient, DeviceRegistrationRepository, SqlDeviceRegistrationRepository};
//!
//! async fn setup_db() -> Result<(), Box<dyn std::error::Error>> {
//!     let db_client = DbClient::from_config(&DatabaseConfig::default()).await?;
//!     let repository = SqlDeviceRegistrationRepository::new(db_client.clone());
//!     repository.init_schema().await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod repositories;

pub use client::{Backend, DbClient};
pub use error::DbError;
pub use repositories::{
    DeviceRegistration, DeviceRegistrationRepository, DeviceTypeCount,
    SqlDeviceRegistrationRepository,
};

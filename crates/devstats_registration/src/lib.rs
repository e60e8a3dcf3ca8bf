//! Device Registration API
//!
//! Accepts `POST /Device/register` with `{userKey, deviceType}`, validates the
//! payload and appends one row to `device_registrations`.
//!
//! # Example
//!
//! ```rust,no_run
//! use devstats_config::DatabaseConfig;
//! use devstats_db::{DbClient, SqlDeviceRegistrationRepository};
//! use devstats_registration::{routes, RegistrationState};
//! use std::sync::Arc;
//!
//! async fn setup_app() -> Result<axum::Router, Box<dyn std::error::Error>> {
//!     let db_client = DbClient::from_config(&DatabaseConfig::default()).await?;
//!     let state = RegistrationState {
//!         repository: Arc::new(SqlDeviceRegistrationRepository::new(db_client)),
//!     };
//!     Ok(routes(state))
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `POST /Device/register` - Store a device registration

#[cfg(feature = "openapi")]
pub mod doc;
pub mod handlers;
#[cfg(test)]
mod handlers_test;
pub mod logic;
#[cfg(test)]
mod logic_test;
pub mod routes;

pub use handlers::RegistrationState;
pub use routes::routes;

#[cfg(feature = "openapi")]
pub mod openapi {
    pub use crate::doc::RegistrationApiDoc;
}

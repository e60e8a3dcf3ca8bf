//! Statistics API
//!
//! Logs authentications by forwarding them to the Device Registration API and
//! reports how many registrations exist per device type.
//!
//! # API Endpoints
//!
//! - `POST /Log/auth` - Log an authentication (registers the device remotely)
//! - `GET /Log/auth/statistics?deviceType=<type>` - Count for one device type
//! - `GET /Log/auth/statistics/all` - Counts for every device type and the total

pub mod client;
#[cfg(feature = "openapi")]
pub mod doc;
pub mod handlers;
pub mod logic;
#[cfg(test)]
mod logic_test;
pub mod routes;

pub use client::{ClientError, HttpRegistrationClient};
pub use handlers::StatisticsState;
pub use routes::routes;

#[cfg(feature = "openapi")]
pub mod openapi {
    pub use crate::doc::StatisticsApiDoc;
}

// --- File: crates/devstats_common/src/lib.rs ---

pub mod models;    // Wire and domain types
pub mod handlers;  // Shared HTTP handlers
pub mod routes;    // Shared route definitions
pub mod error;     // Error handling
pub mod http;      // HTTP utilities
pub mod services;  // Abstractions over outbound calls
pub mod logging;   // Logging utilities
pub mod shutdown;  // Graceful shutdown signal

pub use routes::health_routes;

pub use error::{Context, DevstatsError};

pub use http::{
    client::{create_client, effective_timeout_secs},
    json_response,
};

pub use models::{
    DeviceRegistrationPayload, DeviceType, UnknownDeviceType, ValidatedDevice, ValidationIssue,
};

pub use services::{RegistrationClient, RegistrationOutcome};

#[cfg(feature = "mock")]
pub use services::MockRegistrationClient;

pub use shutdown::shutdown_signal;

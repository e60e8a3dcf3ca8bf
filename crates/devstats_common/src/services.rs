// --- File: crates/devstats_common/src/services.rs ---
//! Service abstractions for calls that leave the process.
//!
//! Handlers depend on these traits rather than on concrete HTTP clients so
//! router state can be assembled with test doubles.

use async_trait::async_trait;

use crate::models::ValidatedDevice;

/// Result of asking the Device Registration API to store a registration.
///
/// Transport problems are folded into this value; callers never see an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistrationOutcome {
    /// `true` only when the remote answered 2xx with `statusCode == 200`.
    pub success: bool,
    /// The `statusCode` from the remote body, else the HTTP status, else 500.
    pub status_code: u16,
}

impl RegistrationOutcome {
    /// Outcome reported for network errors, timeouts and unreadable bodies.
    pub fn transport_failure() -> Self {
        Self {
            success: false,
            status_code: 500,
        }
    }
}

/// Registers devices with the Device Registration API.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait RegistrationClient: Send + Sync {
    /// Performs exactly one registration attempt.
    async fn register_device(&self, device: &ValidatedDevice) -> RegistrationOutcome;
}

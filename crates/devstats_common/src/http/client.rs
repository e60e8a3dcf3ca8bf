// --- File: crates/devstats_common/src/http/client.rs ---
use reqwest::{Client, Error as ReqwestError};
use std::time::Duration;

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// The timeout [`create_client`] applies for a configured value.
pub fn effective_timeout_secs(timeout_secs: u64) -> u64 {
    if timeout_secs == 0 {
        DEFAULT_TIMEOUT_SECS
    } else {
        timeout_secs
    }
}

/// Creates a new HTTP client with custom configuration.
///
/// Every outbound call in the workspace goes through a client built here, so
/// none of them run without a bounded timeout.
///
/// # Arguments
///
/// * `timeout_secs` - The timeout in seconds for the whole request; `0` falls
///   back to [`DEFAULT_TIMEOUT_SECS`]
/// * `follow_redirects` - Whether the client should follow redirects
///
/// # Returns
///
/// A new reqwest::Client instance with the specified configuration
pub fn create_client(timeout_secs: u64, follow_redirects: bool) -> Result<Client, ReqwestError> {
    let timeout_secs = effective_timeout_secs(timeout_secs);

    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(timeout_secs))
        .redirect(if follow_redirects {
            reqwest::redirect::Policy::default()
        } else {
            reqwest::redirect::Policy::none()
        })
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_timeout_falls_back_to_default() {
        assert_eq!(effective_timeout_secs(0), DEFAULT_TIMEOUT_SECS);
        assert_eq!(effective_timeout_secs(2), 2);
    }

    #[test]
    fn zero_timeout_still_builds_a_client() {
        assert!(create_client(0, false).is_ok());
        assert!(create_client(30, true).is_ok());
    }
}

//! Client for the Device Registration API
//!
//! `POST /Log/auth` does not write to the store itself. It forwards the
//! validated payload to `POST <base_url>/Device/register` and reports the
//! outcome. Exactly one attempt is made per call.

use async_trait::async_trait;
use devstats_common::{
    create_client, DeviceRegistrationPayload, DevstatsError, RegistrationClient,
    RegistrationOutcome, ValidatedDevice,
};
use devstats_config::RegistrationClientConfig;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

/// Route appended to the configured base URL.
pub const REGISTER_PATH: &str = "/Device/register";

/// Errors that can occur while talking to the Device Registration API
///
/// These never reach a caller of [`RegistrationClient::register_device`]; they
/// are logged and folded into [`RegistrationOutcome::transport_failure`].
#[derive(Error, Debug)]
pub enum ClientError {
    /// The request timed out
    #[error("request to {url} timed out")]
    Timeout { url: String },

    /// Connection refused, DNS failure and other transport problems
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The response body could not be read as JSON
    #[error("response from {url} is not valid JSON: {message}")]
    InvalidBody { url: String, message: String },
}

impl ClientError {
    fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout {
                url: url.to_string(),
            }
        } else {
            ClientError::Transport {
                url: url.to_string(),
                source: err,
            }
        }
    }
}

/// HTTP implementation of [`RegistrationClient`]
#[derive(Debug, Clone)]
pub struct HttpRegistrationClient {
    client: Client,
    register_url: String,
}

impl HttpRegistrationClient {
    /// Builds a client with the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns an HTTP error if the underlying client cannot be built.
    pub fn new(config: &RegistrationClientConfig) -> Result<Self, DevstatsError> {
        let client = create_client(config.timeout_secs, false)?;
        Ok(Self::with_client(&config.base_url, client))
    }

    /// Uses an already configured `reqwest::Client`.
    pub fn with_client(base_url: &str, client: Client) -> Self {
        Self {
            client,
            register_url: format!("{}{}", base_url.trim_end_matches('/'), REGISTER_PATH),
        }
    }

    /// The full URL registrations are posted to.
    pub fn register_url(&self) -> &str {
        &self.register_url
    }

    async fn try_register(
        &self,
        device: &ValidatedDevice,
    ) -> Result<RegistrationOutcome, ClientError> {
        let url = self.register_url.as_str();
        debug!(url, device_type = %device.device_type, "Calling Device Registration API");

        let response = self
            .client
            .post(url)
            .json(&DeviceRegistrationPayload::from(device))
            .send()
            .await
            .map_err(|e| ClientError::from_reqwest(url, e))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ClientError::from_reqwest(url, e))?;
        let body: Value =
            serde_json::from_slice(&bytes).map_err(|e| ClientError::InvalidBody {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        // A bare `null` has no fields to read, so it counts as unreadable.
        if body.is_null() {
            return Err(ClientError::InvalidBody {
                url: url.to_string(),
                message: "body is null".to_string(),
            });
        }

        Ok(outcome_from_response(status, &body))
    }
}

/// Derives the outcome from a parsed response.
///
/// `statusCode` from the body wins when it is a non-zero integer; otherwise the
/// HTTP status is reported. Success needs both a 2xx status and
/// `statusCode == 200` in the body.
pub fn outcome_from_response(status: StatusCode, body: &Value) -> RegistrationOutcome {
    let body_status = body
        .get("statusCode")
        .and_then(Value::as_u64)
        .filter(|code| *code != 0)
        .and_then(|code| u16::try_from(code).ok());

    RegistrationOutcome {
        success: status.is_success() && body_status == Some(200),
        status_code: body_status.unwrap_or(status.as_u16()),
    }
}

#[async_trait]
impl RegistrationClient for HttpRegistrationClient {
    async fn register_device(&self, device: &ValidatedDevice) -> RegistrationOutcome {
        match self.try_register(device).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(error = %e, "Device Registration API call failed");
                RegistrationOutcome::transport_failure()
            }
        }
    }
}

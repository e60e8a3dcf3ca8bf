// --- File: crates/devstats_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type for process wiring and inter-service calls.
///
/// Endpoint handlers never surface these to callers; they are logged and the
/// endpoint's fixed response shape is returned instead. Other crates extend it
/// by implementing `From<SpecificError> for DevstatsError`.
#[derive(Error, Debug)]
pub enum DevstatsError {
    /// Error occurred during an HTTP request
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during a database operation
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Error occurred due to a timeout
    #[error("Timeout: {0}")]
    TimeoutError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for adding context to errors.
pub trait Context<T, E> {
    /// Adds context to an error.
    fn context<C>(self, context: C) -> Result<T, DevstatsError>
    where
        C: fmt::Display + Send + Sync + 'static;

    /// Adds context to an error with a lazy context provider.
    fn with_context<C, F>(self, f: F) -> Result<T, DevstatsError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E: std::error::Error + Send + Sync + 'static> Context<T, E> for Result<T, E> {
    fn context<C>(self, context: C) -> Result<T, DevstatsError>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|error| DevstatsError::InternalError(format!("{}: {}", context, error)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, DevstatsError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|error| DevstatsError::InternalError(format!("{}: {}", f(), error)))
    }
}

// Common error conversions
impl From<reqwest::Error> for DevstatsError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            DevstatsError::TimeoutError(err.to_string())
        } else if err.is_decode() {
            DevstatsError::ParseError(err.to_string())
        } else {
            DevstatsError::HttpError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for DevstatsError {
    fn from(err: serde_json::Error) -> Self {
        DevstatsError::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for DevstatsError {
    fn from(err: std::io::Error) -> Self {
        DevstatsError::InternalError(err.to_string())
    }
}

impl From<devstats_config::ConfigError> for DevstatsError {
    fn from(err: devstats_config::ConfigError) -> Self {
        DevstatsError::ConfigError(err.to_string())
    }
}

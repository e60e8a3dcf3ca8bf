// --- File: crates/devstats_common/src/http.rs ---
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

// Include the client module
pub mod client;

/// Builds a JSON response with an explicit status code.
///
/// The endpoints in this workspace always answer with a fixed body shape, so
/// the status code travels next to the body rather than through an error type.
pub fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (status, Json(body)).into_response()
}

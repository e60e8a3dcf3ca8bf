//! HTTP handlers for the Device Registration API
//!
//! Every outcome is answered with the same body shape, `{"statusCode": N}`,
//! where `N` mirrors the HTTP status. Failure reasons are logged, never returned.

use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::StatusCode,
    response::Response,
};
use devstats_common::{json_response, DeviceRegistrationPayload, ValidationIssue};
use devstats_db::DeviceRegistrationRepository;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::logic::validate_registration;

/// Shared state for the registration handlers
#[derive(Clone)]
pub struct RegistrationState {
    /// Store the registrations are appended to
    pub repository: Arc<dyn DeviceRegistrationRepository>,
}

/// Response body for `POST /Device/register`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct RegisterDeviceResponse {
    /// 200 when the row was stored, 400 otherwise
    pub status_code: u16,
}

fn respond(status: StatusCode) -> Response {
    json_response(
        status,
        RegisterDeviceResponse {
            status_code: status.as_u16(),
        },
    )
}

/// Handler for registering a device
///
/// # Responses
///
/// - 200 OK: one row was inserted
/// - 400 Bad Request: the body failed validation or the insert failed
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/Device/register",
    request_body = DeviceRegistrationPayload,
    responses(
        (status = 200, description = "Device registered", body = RegisterDeviceResponse),
        (status = 400, description = "Invalid payload or store failure", body = RegisterDeviceResponse)
    ),
    tag = "Device"
))]
pub async fn register_device_handler(
    State(state): State<RegistrationState>,
    payload: Result<Json<DeviceRegistrationPayload>, JsonRejection>,
) -> Response {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            let issues = [ValidationIssue::MalformedBody(rejection.body_text())];
            warn!(?issues, "Validation failed");
            return respond(StatusCode::BAD_REQUEST);
        }
    };

    let device = match validate_registration(&payload) {
        Ok(device) => device,
        Err(issues) => {
            warn!(?issues, "Validation failed");
            return respond(StatusCode::BAD_REQUEST);
        }
    };

    match state.repository.insert_registration(&device).await {
        Ok(stored) => {
            info!(id = stored.id, device_type = %stored.device_type, "Device registered");
            respond(StatusCode::OK)
        }
        Err(e) => {
            error!(error = %e, device_type = %device.device_type, "Failed to register device");
            respond(StatusCode::BAD_REQUEST)
        }
    }
}

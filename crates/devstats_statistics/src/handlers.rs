//! HTTP handlers for the Statistics API
//!
//! Each endpoint has a fixed response shape. Validation problems, store
//! failures and inter-service failures are logged and mapped onto that shape;
//! no error detail is returned to callers.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Json, Query, State,
    },
    http::StatusCode,
    response::Response,
};
use devstats_common::{
    json_response, DeviceRegistrationPayload, RegistrationClient, ValidationIssue,
};
use devstats_db::DeviceRegistrationRepository;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::logic::{
    build_statistics, validate_auth_log, validate_statistics_query, DeviceStatistics,
};

/// Shared state for the statistics handlers
#[derive(Clone)]
pub struct StatisticsState {
    /// Read side of the registration store
    pub repository: Arc<dyn DeviceRegistrationRepository>,
    /// Forwards `POST /Log/auth` to the Device Registration API
    pub registration_client: Arc<dyn RegistrationClient>,
}

/// Response body for `POST /Log/auth`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct AuthLogResponse {
    pub status_code: u16,
    /// `"success"` or `"bad_request"`
    pub message: String,
}

impl AuthLogResponse {
    fn success() -> Self {
        Self {
            status_code: 200,
            message: "success".to_string(),
        }
    }

    fn bad_request() -> Self {
        Self {
            status_code: 400,
            message: "bad_request".to_string(),
        }
    }
}

/// Query string of `GET /Log/auth/statistics`
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
#[serde(rename_all = "camelCase")]
pub struct StatisticsQuery {
    /// One of `iOS`, `Android`, `Watch`, `TV`
    pub device_type: Option<String>,
}

/// Response body for `GET /Log/auth/statistics`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct DeviceCountResponse {
    /// The requested device type, echoed back (empty when absent)
    pub device_type: String,
    /// Row count, or `-1` when the query was invalid or the store failed
    pub count: i64,
}

/// Response body for `GET /Log/auth/statistics/all`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AllStatisticsResponse {
    /// `null` when the store failed
    pub statistics: Option<DeviceStatistics>,
    /// Every stored row, or `-1` when the store failed
    pub total: i64,
}

/// Handler for logging an authentication
///
/// Validates locally, then makes a single call to the Device Registration API.
///
/// # Responses
///
/// - 200 OK: the remote stored the registration
/// - 400 Bad Request: invalid payload or any remote failure
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/Log/auth",
    request_body = DeviceRegistrationPayload,
    responses(
        (status = 200, description = "Authentication logged", body = AuthLogResponse,
         example = json!({"statusCode": 200, "message": "success"})),
        (status = 400, description = "Invalid payload or registration failed", body = AuthLogResponse,
         example = json!({"statusCode": 400, "message": "bad_request"}))
    ),
    tag = "Log"
))]
pub async fn log_auth_handler(
    State(state): State<StatisticsState>,
    payload: Result<Json<DeviceRegistrationPayload>, JsonRejection>,
) -> Response {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            let issues = [ValidationIssue::MalformedBody(rejection.body_text())];
            warn!(?issues, "Validation failed");
            return json_response(StatusCode::BAD_REQUEST, AuthLogResponse::bad_request());
        }
    };

    let device = match validate_auth_log(&payload) {
        Ok(device) => device,
        Err(issues) => {
            warn!(?issues, "Validation failed");
            return json_response(StatusCode::BAD_REQUEST, AuthLogResponse::bad_request());
        }
    };

    let outcome = state.registration_client.register_device(&device).await;
    if outcome.success {
        info!(device_type = %device.device_type, "Auth logged successfully");
        json_response(StatusCode::OK, AuthLogResponse::success())
    } else {
        warn!(
            device_type = %device.device_type,
            status_code = outcome.status_code,
            "Device registration failed"
        );
        json_response(StatusCode::BAD_REQUEST, AuthLogResponse::bad_request())
    }
}

/// Handler for the count of one device type
///
/// Always answers 200. `count` is `-1` for a missing or unknown `deviceType`
/// and when the store cannot be queried.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/Log/auth/statistics",
    params(StatisticsQuery),
    responses(
        (status = 200, description = "Count for the device type, -1 on failure", body = DeviceCountResponse,
         example = json!({"deviceType": "iOS", "count": 42}))
    ),
    tag = "Log"
))]
pub async fn device_statistics_handler(
    State(state): State<StatisticsState>,
    query: Result<Query<StatisticsQuery>, QueryRejection>,
) -> Response {
    let raw = match query {
        Ok(Query(query)) => query.device_type,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "Unreadable statistics query");
            None
        }
    };
    let echoed = raw.clone().unwrap_or_default();

    let device_type = match validate_statistics_query(raw.as_deref()) {
        Ok(device_type) => device_type,
        Err(issue) => {
            warn!(device_type = %echoed, %issue, "Statistics validation failed");
            return json_response(
                StatusCode::OK,
                DeviceCountResponse {
                    device_type: echoed,
                    count: -1,
                },
            );
        }
    };

    let count = match state.repository.count_by_device_type(device_type).await {
        Ok(count) => {
            info!(%device_type, count, "Statistics retrieved");
            count
        }
        Err(e) => {
            error!(error = %e, %device_type, "Error retrieving statistics");
            -1
        }
    };

    json_response(
        StatusCode::OK,
        DeviceCountResponse {
            device_type: echoed,
            count,
        },
    )
}

/// Handler for the counts of every device type
///
/// Always answers 200; a store failure yields `{"statistics": null, "total": -1}`.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/Log/auth/statistics/all",
    responses(
        (status = 200, description = "Counts per device type and overall total", body = AllStatisticsResponse,
         example = json!({"statistics": {"iOS": 3, "Android": 5, "Watch": 0, "TV": 1}, "total": 9}))
    ),
    tag = "Log"
))]
pub async fn all_statistics_handler(State(state): State<StatisticsState>) -> Response {
    let body = match state.repository.counts_grouped_by_device_type().await {
        Ok(rows) => {
            let snapshot = build_statistics(&rows);
            info!(total = snapshot.total, "All statistics retrieved");
            AllStatisticsResponse {
                statistics: Some(snapshot.statistics),
                total: snapshot.total,
            }
        }
        Err(e) => {
            error!(error = %e, "Error retrieving all statistics");
            AllStatisticsResponse {
                statistics: None,
                total: -1,
            }
        }
    };

    json_response(StatusCode::OK, body)
}

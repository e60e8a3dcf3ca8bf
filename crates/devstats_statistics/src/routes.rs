use axum::{
    routing::{get, post},
    Router,
};
use tracing::info;

use crate::handlers::{
    all_statistics_handler, device_statistics_handler, log_auth_handler, StatisticsState,
};

/// Create the Statistics API routes
///
/// # Arguments
///
/// * `state` - Store access and the Device Registration API client
pub fn routes(state: StatisticsState) -> Router {
    info!("Statistics routes initialized");

    Router::new()
        .route("/Log/auth", post(log_auth_handler))
        .route("/Log/auth/statistics", get(device_statistics_handler))
        .route("/Log/auth/statistics/all", get(all_statistics_handler))
        .with_state(state)
}

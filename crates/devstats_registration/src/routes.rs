use axum::{routing::post, Router};
use tracing::info;

use crate::handlers::{register_device_handler, RegistrationState};

/// Create the Device Registration API routes
///
/// The returned router has its state applied and can be merged with the
/// health route and any middleware by the binary.
pub fn routes(state: RegistrationState) -> Router {
    info!("Device registration routes initialized");

    Router::new()
        .route("/Device/register", post(register_device_handler))
        .with_state(state)
}

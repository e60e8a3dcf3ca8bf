// --- File: crates/devstats_common/src/handlers.rs ---
use axum::{extract::State, Json};
use serde::Serialize;

/// Body returned by `GET /health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

/// Liveness probe. Does not touch the store.
pub async fn health_handler(State(service): State<&'static str>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service,
    })
}

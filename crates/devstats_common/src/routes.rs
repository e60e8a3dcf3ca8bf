// --- File: crates/devstats_common/src/routes.rs ---

use axum::{routing::get, Router};

use crate::handlers::health_handler;

/// Creates a router with `GET /health` reporting `service` as the service name.
pub fn health_routes(service: &'static str) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn health_reports_the_service_name() {
        let response = health_routes("statistics-api")
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": "ok", "service": "statistics-api"})
        );
    }
}

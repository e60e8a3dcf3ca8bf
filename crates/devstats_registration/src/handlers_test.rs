#[cfg(test)]
mod tests {
    use crate::handlers::RegistrationState;
    use crate::routes::routes;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use devstats_common::DeviceType;
    use devstats_config::DatabaseConfig;
    use devstats_db::{DbClient, DeviceRegistrationRepository, SqlDeviceRegistrationRepository};
    use serde_json::{json, Value};
    use sqlx::Row;
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn setup() -> (Router, DbClient, Arc<SqlDeviceRegistrationRepository>) {
        let config = DatabaseConfig {
            url: Some("sqlite::memory:".to_string()),
            max_connections: 1,
            ..DatabaseConfig::default()
        };
        let client = DbClient::from_config(&config).await.unwrap();
        let repository = Arc::new(SqlDeviceRegistrationRepository::new(client.clone()));
        repository.init_schema().await.unwrap();

        let app = routes(RegistrationState {
            repository: repository.clone(),
        });
        (app, client, repository)
    }

    async fn post_register(app: Router, body: &str) -> (StatusCode, Value) {
        let request = Request::post("/Device/register")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn total_rows(repository: &SqlDeviceRegistrationRepository) -> i64 {
        repository
            .counts_grouped_by_device_type()
            .await
            .unwrap()
            .iter()
            .map(|c| c.count)
            .sum()
    }

    #[tokio::test]
    async fn test_valid_registration_inserts_one_row() {
        let (app, _client, repository) = setup().await;

        let (status, body) =
            post_register(app, r#"{"userKey":"user-1","deviceType":"iOS"}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"statusCode": 200}));
        assert_eq!(
            repository
                .count_by_device_type(DeviceType::Ios)
                .await
                .unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn test_stored_user_key_is_trimmed() {
        let (app, client, _repository) = setup().await;

        let (status, _) =
            post_register(app, r#"{"userKey":"  padded  ","deviceType":"TV"}"#).await;
        assert_eq!(status, StatusCode::OK);

        let row = sqlx::query("SELECT user_key, device_type FROM device_registrations")
            .fetch_one(client.pool())
            .await
            .unwrap();
        let user_key: String = row.get("user_key");
        let device_type: String = row.get("device_type");
        assert_eq!(user_key, "padded");
        assert_eq!(device_type, "TV");
    }

    #[tokio::test]
    async fn test_identical_registrations_are_not_deduplicated() {
        let (app, _client, repository) = setup().await;

        for _ in 0..2 {
            let (status, _) =
                post_register(app.clone(), r#"{"userKey":"dup","deviceType":"Watch"}"#).await;
            assert_eq!(status, StatusCode::OK);
        }

        assert_eq!(
            repository
                .count_by_device_type(DeviceType::Watch)
                .await
                .unwrap(),
            2
        );
    }

    #[tokio::test]
    async fn test_invalid_payloads_are_rejected_without_store_access() {
        let (app, _client, repository) = setup().await;

        let bodies = [
            r#"{"userKey":"u","deviceType":"Xbox"}"#,
            r#"{"userKey":"u","deviceType":"ios"}"#,
            r#"{"userKey":"   ","deviceType":"iOS"}"#,
            r#"{"userKey":"","deviceType":"iOS"}"#,
            r#"{"deviceType":"iOS"}"#,
            r#"{"userKey":"u"}"#,
            r#"{"userKey":7,"deviceType":"iOS"}"#,
            r#"{"userKey":"u","deviceType":["iOS"]}"#,
            r#"["u","iOS"]"#,
            "null",
            "not json",
        ];

        for body in bodies {
            let (status, json) = post_register(app.clone(), body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
            assert_eq!(json, json!({"statusCode": 400}), "body: {body}");
        }

        assert_eq!(total_rows(&repository).await, 0);
    }

    #[tokio::test]
    async fn test_missing_content_type_is_a_bad_request() {
        let (app, _client, _repository) = setup().await;

        let request = Request::post("/Device/register")
            .body(Body::from(r#"{"userKey":"u","deviceType":"iOS"}"#))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_store_failure_is_reported_as_bad_request() {
        let (app, client, _repository) = setup().await;
        client.close().await;

        let (status, body) =
            post_register(app, r#"{"userKey":"user-1","deviceType":"Android"}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"statusCode": 400}));
    }
}

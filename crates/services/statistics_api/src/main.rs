// File: services/statistics_api/src/main.rs
use axum::Router;
use devstats_common::{
    effective_timeout_secs, health_routes, logging, shutdown_signal, Context, DevstatsError,
};
use devstats_config::load_config;
use devstats_db::{DbClient, DeviceRegistrationRepository, SqlDeviceRegistrationRepository};
use devstats_statistics::{HttpRegistrationClient, StatisticsState};
use std::process::ExitCode;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

const SERVICE_NAME: &str = "statistics-api";

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            logging::log_error(&e, &format!("{} terminated", SERVICE_NAME));
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), DevstatsError> {
    let config = load_config()?;

    let db_client = DbClient::from_config(&config.database).await?;
    logging::log_result(
        db_client.ping().await,
        "Database connected successfully",
        "Database connectivity check failed",
    )?;

    let repository = SqlDeviceRegistrationRepository::new(db_client.clone());
    if config.database.init_schema {
        repository.init_schema().await?;
    }

    let registration_client = HttpRegistrationClient::new(&config.registration_client)?;
    info!(
        url = registration_client.register_url(),
        timeout_secs = effective_timeout_secs(config.registration_client.timeout_secs),
        "Device Registration API client configured"
    );

    let state = StatisticsState {
        repository: Arc::new(repository),
        registration_client: Arc::new(registration_client),
    };

    #[allow(unused_mut)] // mutated when the openapi feature is enabled
    let mut app = Router::new()
        .merge(health_routes(SERVICE_NAME))
        .merge(devstats_statistics::routes(state));

    #[cfg(feature = "openapi")]
    {
        use devstats_statistics::openapi::StatisticsApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        info!("Adding Swagger UI at /docs");
        app = app.merge(
            SwaggerUi::new("/docs").url("/docs/openapi.json", StatisticsApiDoc::openapi()),
        );
    }

    let app = app.layer(TraceLayer::new_for_http());

    let addr = config.statistics_api.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("{} listening on http://{}", SERVICE_NAME, addr);

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error");

    db_client.close().await;
    served
}

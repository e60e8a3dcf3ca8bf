use utoipa::OpenApi;

use crate::handlers::{AllStatisticsResponse, AuthLogResponse, DeviceCountResponse};
use crate::logic::DeviceStatistics;
use devstats_common::{DeviceRegistrationPayload, DeviceType};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::log_auth_handler,
        crate::handlers::device_statistics_handler,
        crate::handlers::all_statistics_handler,
    ),
    components(
        schemas(
            DeviceRegistrationPayload,
            DeviceType,
            AuthLogResponse,
            DeviceCountResponse,
            AllStatisticsResponse,
            DeviceStatistics,
        )
    ),
    tags(
        (name = "Log", description = "Authentication logging and device statistics")
    )
)]
pub struct StatisticsApiDoc;

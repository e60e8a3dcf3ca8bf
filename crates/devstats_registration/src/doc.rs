use utoipa::OpenApi;

use crate::handlers::RegisterDeviceResponse;
use devstats_common::{DeviceRegistrationPayload, DeviceType};

#[derive(OpenApi)]
#[openapi(
    paths(crate::handlers::register_device_handler),
    components(schemas(DeviceRegistrationPayload, DeviceType, RegisterDeviceResponse)),
    tags(
        (name = "Device", description = "Device Registration API")
    )
)]
pub struct RegistrationApiDoc;

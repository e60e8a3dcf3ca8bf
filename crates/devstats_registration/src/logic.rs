// --- File: crates/devstats_registration/src/logic.rs ---

use devstats_common::{DeviceRegistrationPayload, DeviceType, ValidatedDevice, ValidationIssue};

/// Validates a registration payload.
///
/// The user key is trimmed and must be non-empty afterwards. The device type
/// must match one of the four names exactly. Every problem found is reported,
/// not just the first.
pub fn validate_registration(
    payload: &DeviceRegistrationPayload,
) -> Result<ValidatedDevice, Vec<ValidationIssue>> {
    let mut issues = Vec::new();

    let user_key = payload
        .user_key
        .as_deref()
        .map(str::trim)
        .filter(|key| !key.is_empty());
    if user_key.is_none() {
        issues.push(ValidationIssue::MissingUserKey);
    }

    let device_type = match payload.device_type.as_deref() {
        None | Some("") => {
            issues.push(ValidationIssue::MissingDeviceType);
            None
        }
        Some(raw) => match raw.parse::<DeviceType>() {
            Ok(device_type) => Some(device_type),
            Err(_) => {
                issues.push(ValidationIssue::InvalidDeviceType(raw.to_string()));
                None
            }
        },
    };

    match (user_key, device_type) {
        (Some(user_key), Some(device_type)) => Ok(ValidatedDevice {
            user_key: user_key.to_string(),
            device_type,
        }),
        _ => Err(issues),
    }
}

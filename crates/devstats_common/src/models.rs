// --- File: crates/devstats_common/src/models.rs ---

// Wire and domain types shared by both services.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The four device categories a registration can carry.
///
/// Parsing is case-sensitive: `"ios"` or `"tv"` are rejected.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceType {
    #[serde(rename = "iOS")]
    Ios,
    Android,
    Watch,
    #[serde(rename = "TV")]
    Tv,
}

impl DeviceType {
    /// Every device type, in display order.
    pub const ALL: [DeviceType; 4] = [
        DeviceType::Ios,
        DeviceType::Android,
        DeviceType::Watch,
        DeviceType::Tv,
    ];

    /// The exact string stored in `device_registrations.device_type`.
    pub fn as_str(self) -> &'static str {
        match self {
            DeviceType::Ios => "iOS",
            DeviceType::Android => "Android",
            DeviceType::Watch => "Watch",
            DeviceType::Tv => "TV",
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the four device types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown device type: {0}")]
pub struct UnknownDeviceType(pub String);

impl FromStr for DeviceType {
    type Err = UnknownDeviceType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DeviceType::ALL
            .into_iter()
            .find(|device_type| device_type.as_str() == s)
            .ok_or_else(|| UnknownDeviceType(s.to_string()))
    }
}

/// JSON body accepted by `POST /Device/register` and `POST /Log/auth`.
///
/// Both fields are optional at the serde level so that a missing field is
/// reported as a validation issue instead of a deserialization failure.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRegistrationPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_type: Option<String>,
}

/// A payload that passed validation: the user key is trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedDevice {
    pub user_key: String,
    pub device_type: DeviceType,
}

impl From<&ValidatedDevice> for DeviceRegistrationPayload {
    fn from(device: &ValidatedDevice) -> Self {
        Self {
            user_key: Some(device.user_key.clone()),
            device_type: Some(device.device_type.as_str().to_string()),
        }
    }
}

/// A single reason a request was rejected. Logged, never returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationIssue {
    #[error("request body must be a JSON object with string fields: {0}")]
    MalformedBody(String),

    #[error("userKey is required and must be a non-empty string")]
    MissingUserKey,

    #[error("deviceType is required and must be a string")]
    MissingDeviceType,

    #[error("deviceType '{0}' must be one of: iOS, Android, Watch, TV")]
    InvalidDeviceType(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_type_parsing_is_exact() {
        assert_eq!("iOS".parse::<DeviceType>(), Ok(DeviceType::Ios));
        assert_eq!("TV".parse::<DeviceType>(), Ok(DeviceType::Tv));
        assert!("ios".parse::<DeviceType>().is_err());
        assert!("Xbox".parse::<DeviceType>().is_err());
        assert!(" Watch".parse::<DeviceType>().is_err());
    }

    #[test]
    fn device_type_serializes_to_stored_names() {
        let json = serde_json::to_string(&DeviceType::ALL).unwrap();
        assert_eq!(json, r#"["iOS","Android","Watch","TV"]"#);
    }

    #[test]
    fn payload_uses_camel_case_and_tolerates_missing_fields() {
        let payload: DeviceRegistrationPayload =
            serde_json::from_str(r#"{"userKey":"u-1"}"#).unwrap();
        assert_eq!(payload.user_key.as_deref(), Some("u-1"));
        assert!(payload.device_type.is_none());
    }

    #[test]
    fn payload_rejects_non_string_fields() {
        let result = serde_json::from_str::<DeviceRegistrationPayload>(r#"{"userKey":42}"#);
        assert!(result.is_err());
    }

    #[test]
    fn validated_device_round_trips_into_wire_payload() {
        let device = ValidatedDevice {
            user_key: "u-1".to_string(),
            device_type: DeviceType::Watch,
        };
        let json = serde_json::to_value(DeviceRegistrationPayload::from(&device)).unwrap();
        assert_eq!(json, serde_json::json!({"userKey": "u-1", "deviceType": "Watch"}));
    }
}

// --- File: crates/devstats_statistics/src/logic.rs ---

use devstats_common::{DeviceRegistrationPayload, DeviceType, ValidatedDevice, ValidationIssue};
use devstats_db::DeviceTypeCount;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Validates a `POST /Log/auth` payload.
///
/// Same rules as the Device Registration API: trimmed non-empty `userKey`,
/// exact `deviceType`. Checked here so bad input never leaves the process.
pub fn validate_auth_log(
    payload: &DeviceRegistrationPayload,
) -> Result<ValidatedDevice, Vec<ValidationIssue>> {
    let mut issues = Vec::new();

    let user_key = match payload.user_key.as_deref().map(str::trim) {
        Some(key) if !key.is_empty() => Some(key.to_string()),
        _ => {
            issues.push(ValidationIssue::MissingUserKey);
            None
        }
    };

    let device_type = match payload.device_type.as_deref() {
        Some(raw) if !raw.is_empty() => match raw.parse::<DeviceType>() {
            Ok(device_type) => Some(device_type),
            Err(_) => {
                issues.push(ValidationIssue::InvalidDeviceType(raw.to_string()));
                None
            }
        },
        _ => {
            issues.push(ValidationIssue::MissingDeviceType);
            None
        }
    };

    match (user_key, device_type) {
        (Some(user_key), Some(device_type)) => Ok(ValidatedDevice {
            user_key,
            device_type,
        }),
        _ => Err(issues),
    }
}

/// Validates the `deviceType` query parameter of `GET /Log/auth/statistics`.
pub fn validate_statistics_query(device_type: Option<&str>) -> Result<DeviceType, ValidationIssue> {
    match device_type {
        None | Some("") => Err(ValidationIssue::MissingDeviceType),
        Some(raw) => raw
            .parse()
            .map_err(|_| ValidationIssue::InvalidDeviceType(raw.to_string())),
    }
}

/// Per-type counts as returned by `GET /Log/auth/statistics/all`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DeviceStatistics {
    #[serde(rename = "iOS")]
    pub ios: i64,
    #[serde(rename = "Android")]
    pub android: i64,
    #[serde(rename = "Watch")]
    pub watch: i64,
    #[serde(rename = "TV")]
    pub tv: i64,
}

impl DeviceStatistics {
    fn slot_mut(&mut self, device_type: DeviceType) -> &mut i64 {
        match device_type {
            DeviceType::Ios => &mut self.ios,
            DeviceType::Android => &mut self.android,
            DeviceType::Watch => &mut self.watch,
            DeviceType::Tv => &mut self.tv,
        }
    }

    /// Sum of the four displayed counts.
    pub fn displayed_sum(&self) -> i64 {
        self.ios + self.android + self.watch + self.tv
    }
}

/// Counts for the four known types plus the total of every stored row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatisticsSnapshot {
    pub statistics: DeviceStatistics,
    pub total: i64,
}

/// Folds grouped store counts into a snapshot.
///
/// Known types overwrite their zero default. `total` sums every row the store
/// returned, so rows with an unknown `device_type` make it exceed
/// [`DeviceStatistics::displayed_sum`]. That case is logged as a warning.
pub fn build_statistics(rows: &[DeviceTypeCount]) -> StatisticsSnapshot {
    let mut snapshot = StatisticsSnapshot::default();

    for row in rows {
        if let Ok(device_type) = row.device_type.parse::<DeviceType>() {
            *snapshot.statistics.slot_mut(device_type) = row.count;
        }
        snapshot.total += row.count;
    }

    let displayed = snapshot.statistics.displayed_sum();
    if snapshot.total != displayed {
        warn!(
            total = snapshot.total,
            displayed,
            "Total includes registrations with unknown device types"
        );
    }

    snapshot
}

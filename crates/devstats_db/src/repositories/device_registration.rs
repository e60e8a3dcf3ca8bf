//! Repository for device registrations
//!
//! Rows are only ever inserted. There is no update or delete and no
//! deduplication: the same `(user_key, device_type)` pair may appear many times.

use crate::error::DbError;
use async_trait::async_trait;
use devstats_common::{DeviceType, ValidatedDevice};

/// A stored registration row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceRegistration {
    pub id: i64,
    pub user_key: String,
    pub device_type: DeviceType,
    /// Creation time as rendered by the database. Chrono types cannot be
    /// decoded through the `Any` driver, so the column is cast to text.
    pub created_at: Option<String>,
}

/// One row of the grouped count query.
///
/// `device_type` stays a plain string: the table has no constraint on the
/// column, so rows written by other tools may hold values outside the four
/// known types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceTypeCount {
    pub device_type: String,
    pub count: i64,
}

/// Repository for device registrations
///
/// Object safe so both services can hold it as `Arc<dyn DeviceRegistrationRepository>`
/// and tests can substitute their own store.
#[async_trait]
pub trait DeviceRegistrationRepository: Send + Sync {
    /// Create the `device_registrations` table and its index if missing.
    async fn init_schema(&self) -> Result<(), DbError>;

    /// Insert one registration row.
    ///
    /// # Returns
    ///
    /// The stored row with its generated id and creation time.
    async fn insert_registration(
        &self,
        device: &ValidatedDevice,
    ) -> Result<DeviceRegistration, DbError>;

    /// Number of rows whose `device_type` equals `device_type` exactly.
    async fn count_by_device_type(&self, device_type: DeviceType) -> Result<i64, DbError>;

    /// Row counts grouped by every distinct stored `device_type`.
    async fn counts_grouped_by_device_type(&self) -> Result<Vec<DeviceTypeCount>, DbError>;
}

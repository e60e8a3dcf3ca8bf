//! SQL implementation of the device registration repository
//!
//! All statements use `$N` placeholders, which both Postgres and the SQLite
//! driver accept, so only the DDL differs per backend.

use crate::client::{Backend, DbClient};
use crate::error::DbError;
use crate::repositories::device_registration::{
    DeviceRegistration, DeviceRegistrationRepository, DeviceTypeCount,
};
use async_trait::async_trait;
use devstats_common::{DeviceType, ValidatedDevice};
use sqlx::Row;
use tracing::{debug, error, info, warn};

const POSTGRES_SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS device_registrations (
        id BIGSERIAL PRIMARY KEY,
        user_key VARCHAR(255) NOT NULL,
        device_type VARCHAR(50) NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_device_registrations_device_type ON device_registrations (device_type)",
];

const SQLITE_SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS device_registrations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_key TEXT NOT NULL,
        device_type TEXT NOT NULL,
        created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_device_registrations_device_type ON device_registrations (device_type)",
];

/// SQL implementation of the device registration repository
#[derive(Debug, Clone)]
pub struct SqlDeviceRegistrationRepository {
    /// The database client
    db_client: DbClient,
}

impl SqlDeviceRegistrationRepository {
    /// Create a new SQL device registration repository
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }
}

#[async_trait]
impl DeviceRegistrationRepository for SqlDeviceRegistrationRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        let backend = self.db_client.backend();
        debug!(?backend, "Initializing device registration schema");

        let statements = match backend {
            Backend::Postgres => POSTGRES_SCHEMA,
            Backend::Sqlite => SQLITE_SCHEMA,
        };
        for statement in statements {
            self.db_client.execute(statement).await?;
        }

        info!("Device registration schema initialized successfully");
        Ok(())
    }

    async fn insert_registration(
        &self,
        device: &ValidatedDevice,
    ) -> Result<DeviceRegistration, DbError> {
        debug!(device_type = %device.device_type, "Inserting device registration");

        let query = r#"
            INSERT INTO device_registrations (user_key, device_type)
            VALUES ($1, $2)
            RETURNING id, CAST(created_at AS TEXT) AS created_at
        "#;

        let row = sqlx::query(query)
            .bind(device.user_key.as_str())
            .bind(device.device_type.as_str())
            .fetch_one(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to insert device registration: {}", e);
                DbError::from_query(e)
            })?;

        let inserted = DeviceRegistration {
            id: row.try_get("id")?,
            user_key: device.user_key.clone(),
            device_type: device.device_type,
            created_at: row.try_get("created_at").ok(),
        };

        info!(id = inserted.id, device_type = %inserted.device_type, "Device registration stored");
        Ok(inserted)
    }

    async fn count_by_device_type(&self, device_type: DeviceType) -> Result<i64, DbError> {
        debug!(%device_type, "Counting device registrations");

        let query = r#"
            SELECT COUNT(*) AS count
            FROM device_registrations
            WHERE device_type = $1
        "#;

        let row = sqlx::query(query)
            .bind(device_type.as_str())
            .fetch_one(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to count device registrations: {}", e);
                DbError::from_query(e)
            })?;

        Ok(row.try_get("count")?)
    }

    async fn counts_grouped_by_device_type(&self) -> Result<Vec<DeviceTypeCount>, DbError> {
        debug!("Counting device registrations grouped by device type");

        let query = r#"
            SELECT device_type, COUNT(*) AS count
            FROM device_registrations
            GROUP BY device_type
            ORDER BY device_type
        "#;

        let rows = sqlx::query(query)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to count device registrations by type: {}", e);
                DbError::from_query(e)
            })?;

        let counts = rows
            .iter()
            .map(|row| {
                Ok(DeviceTypeCount {
                    device_type: row.try_get("device_type")?,
                    count: row.try_get("count")?,
                })
            })
            .collect::<Result<Vec<_>, DbError>>()?;

        for count in &counts {
            if count.device_type.parse::<DeviceType>().is_err() {
                warn!(
                    device_type = %count.device_type,
                    count = count.count,
                    "Stored registrations carry an unknown device type"
                );
            }
        }

        Ok(counts)
    }
}

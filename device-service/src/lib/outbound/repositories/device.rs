use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::device::errors::DeviceError;
use crate::domain::device::models::Device;
use crate::domain::device::models::DeviceDetails;
use crate::domain::device::models::DeviceId;
use crate::domain::device::models::DeviceName;
use crate::domain::device::models::DeviceStatus;
use crate::domain::device::ports::DeviceRepository;

pub struct PostgresDeviceRepository {
    pool: PgPool,
}

impl PostgresDeviceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_device(row: &PgRow) -> Result<Device, DeviceError> {
        let status: String = row.get("status");

        Ok(Device {
            id: DeviceId(row.get("id")),
            name: DeviceName::new(row.get("name"))?,
            location: row.get("location"),
            status: status.parse::<DeviceStatus>()?,
        })
    }

    fn map_write_error(e: sqlx::Error, name: &DeviceName) -> DeviceError {
        if let Some(db_err) = e.as_database_error() {
            if db_err.is_unique_violation() && db_err.constraint() == Some("devices_name_key") {
                return DeviceError::NameAlreadyExists(name.to_string());
            }
        }
        DeviceError::DatabaseError(e.to_string())
    }
}

#[async_trait]
impl DeviceRepository for PostgresDeviceRepository {
    async fn create(
        &self,
        details: DeviceDetails,
        created_by: &str,
    ) -> Result<Device, DeviceError> {
        let row = sqlx::query(
            r#"
            INSERT INTO devices (name, location, status, created_by)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, location, status
            "#,
        )
        .bind(details.name.as_str())
        .bind(&details.location)
        .bind(details.status.as_str())
        .bind(created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Self::map_write_error(e, &details.name))?;

        Self::row_to_device(&row)
    }

    async fn find_by_id(&self, id: DeviceId) -> Result<Option<Device>, DeviceError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, location, status
            FROM devices
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DeviceError::DatabaseError(e.to_string()))?;

        row.as_ref().map(Self::row_to_device).transpose()
    }

    async fn find_by_name(&self, name: &DeviceName) -> Result<Option<Device>, DeviceError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, location, status
            FROM devices
            WHERE name = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(name.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DeviceError::DatabaseError(e.to_string()))?;

        row.as_ref().map(Self::row_to_device).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Device>, DeviceError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, location, status
            FROM devices
            WHERE deleted_at IS NULL
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DeviceError::DatabaseError(e.to_string()))?;

        rows.iter().map(Self::row_to_device).collect()
    }

    async fn update(
        &self,
        id: DeviceId,
        details: DeviceDetails,
        updated_by: &str,
    ) -> Result<(), DeviceError> {
        let result = sqlx::query(
            r#"
            UPDATE devices
            SET name = $2, location = $3, status = $4, updated_at = NOW(), updated_by = $5
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id.0)
        .bind(details.name.as_str())
        .bind(&details.location)
        .bind(details.status.as_str())
        .bind(updated_by)
        .execute(&self.pool)
        .await
        .map_err(|e| Self::map_write_error(e, &details.name))?;

        if result.rows_affected() == 0 {
            return Err(DeviceError::NotFound(id));
        }

        Ok(())
    }

    async fn delete(&self, id: DeviceId, deleted_by: &str) -> Result<(), DeviceError> {
        let result = sqlx::query(
            r#"
            UPDATE devices
            SET deleted_at = NOW(), deleted_by = $2
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id.0)
        .bind(deleted_by)
        .execute(&self.pool)
        .await
        .map_err(|e| DeviceError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(DeviceError::NotFound(id));
        }

        Ok(())
    }
}

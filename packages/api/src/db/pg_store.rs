//! PostgreSQL implementation of [`store::RemoteStore`].

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use store::{
    Device, DeviceStatus, Operation, OperationRecord, OperationStatus, RemoteStore, StoreError,
    User,
};

use crate::models::{DeviceRow, OperationRecordRow, OperationRow, UserRow};

const USER_COLUMNS: &str = "id, name, badge_number, password, role";
const DEVICE_COLUMNS: &str = "id, device_number, status";
const OPERATION_COLUMNS: &str = "id, device_id, collaborator_id, status, operation_date";

// Commit failures are logged with their device by the lifecycle controller.
fn remote(e: sqlx::Error) -> StoreError {
    tracing::debug!("database error: {}", e);
    StoreError::new(e.to_string())
}

/// RemoteStore over the shared connection pool.
#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Store over the process-wide pool from [`super::get_pool`].
    pub async fn connect() -> Result<Self, sqlx::Error> {
        Ok(Self::new(super::get_pool().await?.clone()))
    }
}

impl RemoteStore for PgStore {
    async fn find_user(&self, id: i64) -> Result<Option<User>, StoreError> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(remote)?;
        Ok(row.map(User::from))
    }

    async fn find_user_by_badge(&self, badge_number: &str) -> Result<Option<User>, StoreError> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE badge_number = $1"
        ))
        .bind(badge_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(remote)?;
        Ok(row.map(User::from))
    }

    async fn find_device(&self, id: i64) -> Result<Option<Device>, StoreError> {
        let row: Option<DeviceRow> = sqlx::query_as(&format!(
            "SELECT {DEVICE_COLUMNS} FROM devices WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(remote)?;
        row.map(Device::try_from).transpose()
    }

    async fn find_device_by_number(&self, device_number: &str) -> Result<Option<Device>, StoreError> {
        let row: Option<DeviceRow> = sqlx::query_as(&format!(
            "SELECT {DEVICE_COLUMNS} FROM devices WHERE device_number = $1"
        ))
        .bind(device_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(remote)?;
        row.map(Device::try_from).transpose()
    }

    async fn list_devices(&self, status: Option<DeviceStatus>) -> Result<Vec<Device>, StoreError> {
        let rows: Vec<DeviceRow> = match status {
            Some(status) => sqlx::query_as::<_, DeviceRow>(&format!(
                "SELECT {DEVICE_COLUMNS} FROM devices WHERE status = $1 ORDER BY id"
            ))
            .bind(status.as_str())
            .fetch_all(&self.pool)
            .await,
            None => sqlx::query_as::<_, DeviceRow>(&format!("SELECT {DEVICE_COLUMNS} FROM devices ORDER BY id"))
                .fetch_all(&self.pool)
                .await,
        }
        .map_err(remote)?;
        rows.into_iter().map(Device::try_from).collect()
    }

    async fn released_operations(&self, device_id: i64) -> Result<Vec<Operation>, StoreError> {
        let rows: Vec<OperationRow> = sqlx::query_as(&format!(
            "SELECT {OPERATION_COLUMNS} FROM operations WHERE device_id = $1 AND status = $2"
        ))
        .bind(device_id)
        .bind(OperationStatus::Released.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(remote)?;
        rows.into_iter().map(Operation::try_from).collect()
    }

    async fn list_operation_records(&self) -> Result<Vec<OperationRecord>, StoreError> {
        let rows: Vec<OperationRecordRow> = sqlx::query_as(
            "SELECT o.id, o.device_id, d.device_number, u.name AS collaborator_name,
                    o.status, o.operation_date
             FROM operations o
             LEFT JOIN users u ON u.id = o.collaborator_id
             LEFT JOIN devices d ON d.id = o.device_id
             ORDER BY o.id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(remote)?;
        rows.into_iter().map(OperationRecord::try_from).collect()
    }

    async fn set_device_status(&self, device_id: i64, status: DeviceStatus) -> Result<(), StoreError> {
        sqlx::query("UPDATE devices SET status = $1 WHERE id = $2")
            .bind(status.as_str())
            .bind(device_id)
            .execute(&self.pool)
            .await
            .map_err(remote)?;
        Ok(())
    }

    async fn commit_release(
        &self,
        device_id: i64,
        collaborator_id: i64,
        at: DateTime<Utc>,
    ) -> Result<Operation, StoreError> {
        let mut tx = self.pool.begin().await.map_err(remote)?;

        sqlx::query("UPDATE devices SET status = $1 WHERE id = $2")
            .bind(DeviceStatus::InOperation.as_str())
            .bind(device_id)
            .execute(&mut *tx)
            .await
            .map_err(remote)?;

        let row: OperationRow = sqlx::query_as(&format!(
            "INSERT INTO operations (device_id, collaborator_id, status, operation_date)
             VALUES ($1, $2, $3, $4)
             RETURNING {OPERATION_COLUMNS}"
        ))
        .bind(device_id)
        .bind(collaborator_id)
        .bind(OperationStatus::Released.as_str())
        .bind(at)
        .fetch_one(&mut *tx)
        .await
        .map_err(remote)?;

        tx.commit().await.map_err(remote)?;
        Operation::try_from(row)
    }

    async fn commit_return(&self, device_id: i64, operation_id: i64) -> Result<Operation, StoreError> {
        let mut tx = self.pool.begin().await.map_err(remote)?;

        sqlx::query("UPDATE devices SET status = $1 WHERE id = $2")
            .bind(DeviceStatus::Available.as_str())
            .bind(device_id)
            .execute(&mut *tx)
            .await
            .map_err(remote)?;

        let row: Option<OperationRow> = sqlx::query_as(&format!(
            "UPDATE operations SET status = $1 WHERE id = $2 RETURNING {OPERATION_COLUMNS}"
        ))
        .bind(OperationStatus::Finished.as_str())
        .bind(operation_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(remote)?;

        // Dropping the transaction rolls the device update back.
        let Some(row) = row else {
            return Err(StoreError::new(format!("operation {operation_id} vanished")));
        };

        tx.commit().await.map_err(remote)?;
        Operation::try_from(row)
    }
}

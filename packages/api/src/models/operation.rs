use chrono::{DateTime, Utc};
use sqlx::FromRow;
use store::StoreError;

/// Row from the `operations` table.
#[derive(Debug, Clone, FromRow)]
pub struct OperationRow {
    pub id: i64,
    pub device_id: i64,
    pub collaborator_id: i64,
    pub status: String,
    pub operation_date: DateTime<Utc>,
}

impl TryFrom<OperationRow> for store::Operation {
    type Error = StoreError;

    fn try_from(row: OperationRow) -> Result<Self, Self::Error> {
        Ok(store::Operation {
            id: row.id,
            device_id: row.device_id,
            collaborator_id: row.collaborator_id,
            status: row.status.parse()?,
            operation_date: row.operation_date,
        })
    }
}

/// Operation joined with its device number and collaborator name.
#[derive(Debug, Clone, FromRow)]
pub struct OperationRecordRow {
    pub id: i64,
    pub device_id: i64,
    pub device_number: Option<String>,
    pub collaborator_name: Option<String>,
    pub status: String,
    pub operation_date: DateTime<Utc>,
}

impl TryFrom<OperationRecordRow> for store::OperationRecord {
    type Error = StoreError;

    fn try_from(row: OperationRecordRow) -> Result<Self, Self::Error> {
        Ok(store::OperationRecord {
            id: row.id,
            device_id: row.device_id,
            device_number: row.device_number,
            collaborator_name: row.collaborator_name,
            status: row.status.parse()?,
            operation_date: row.operation_date,
        })
    }
}

use sqlx::FromRow;
use store::StoreError;

/// Row from the `devices` table.
#[derive(Debug, Clone, FromRow)]
pub struct DeviceRow {
    pub id: i64,
    pub device_number: String,
    pub status: String,
}

impl TryFrom<DeviceRow> for store::Device {
    type Error = StoreError;

    fn try_from(row: DeviceRow) -> Result<Self, Self::Error> {
        Ok(store::Device {
            id: row.id,
            device_number: row.device_number,
            status: row.status.parse()?,
        })
    }
}

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use crate::error::{StoreError, StoreResult};
use crate::models::{
    Device, DeviceStatus, Operation, OperationRecord, OperationStatus, Role, User,
};
use crate::remote::RemoteStore;

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    devices: Vec<Device>,
    operations: Vec<Operation>,
    next_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-memory RemoteStore for tests and local demos.
///
/// Both writes of a commit happen under one lock, so this backend behaves
/// like a transactional one.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
    offline: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail as if the backend were unreachable.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn add_user(&self, name: &str, badge_number: &str, password: &str, role: Role) -> i64 {
        let mut tables = self.tables.lock().unwrap_or_else(|e| e.into_inner());
        let id = tables.next_id();
        tables.users.push(User {
            id,
            name: name.to_string(),
            badge_number: badge_number.to_string(),
            password: password.to_string(),
            role,
        });
        id
    }

    pub fn add_device(&self, device_number: &str, status: DeviceStatus) -> i64 {
        let mut tables = self.tables.lock().unwrap_or_else(|e| e.into_inner());
        let id = tables.next_id();
        tables.devices.push(Device {
            id,
            device_number: device_number.to_string(),
            status,
        });
        id
    }

    /// Insert an operation row directly, bypassing the lifecycle rules.
    pub fn add_operation(
        &self,
        device_id: i64,
        collaborator_id: i64,
        status: OperationStatus,
        operation_date: DateTime<Utc>,
    ) -> i64 {
        let mut tables = self.tables.lock().unwrap_or_else(|e| e.into_inner());
        let id = tables.next_id();
        tables.operations.push(Operation {
            id,
            device_id,
            collaborator_id,
            status,
            operation_date,
        });
        id
    }

    pub fn devices(&self) -> Vec<Device> {
        self.tables
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .devices
            .clone()
    }

    pub fn operations(&self) -> Vec<Operation> {
        self.tables
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .operations
            .clone()
    }

    fn tables(&self) -> StoreResult<MutexGuard<'_, Tables>> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::new("store unavailable"));
        }
        self.tables
            .lock()
            .map_err(|_| StoreError::new("memory store lock poisoned"))
    }
}

impl RemoteStore for MemoryStore {
    async fn find_user(&self, id: i64) -> StoreResult<Option<User>> {
        Ok(self.tables()?.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_badge(&self, badge_number: &str) -> StoreResult<Option<User>> {
        Ok(self
            .tables()?
            .users
            .iter()
            .find(|u| u.badge_number == badge_number)
            .cloned())
    }

    async fn find_device(&self, id: i64) -> StoreResult<Option<Device>> {
        Ok(self.tables()?.devices.iter().find(|d| d.id == id).cloned())
    }

    async fn find_device_by_number(&self, device_number: &str) -> StoreResult<Option<Device>> {
        Ok(self
            .tables()?
            .devices
            .iter()
            .find(|d| d.device_number == device_number)
            .cloned())
    }

    async fn list_devices(&self, status: Option<DeviceStatus>) -> StoreResult<Vec<Device>> {
        Ok(self
            .tables()?
            .devices
            .iter()
            .filter(|d| status.map_or(true, |s| d.status == s))
            .cloned()
            .collect())
    }

    async fn released_operations(&self, device_id: i64) -> StoreResult<Vec<Operation>> {
        Ok(self
            .tables()?
            .operations
            .iter()
            .filter(|o| o.device_id == device_id && o.is_open())
            .cloned()
            .collect())
    }

    async fn list_operation_records(&self) -> StoreResult<Vec<OperationRecord>> {
        let tables = self.tables()?;
        Ok(tables
            .operations
            .iter()
            .map(|op| OperationRecord {
                id: op.id,
                device_id: op.device_id,
                device_number: tables
                    .devices
                    .iter()
                    .find(|d| d.id == op.device_id)
                    .map(|d| d.device_number.clone()),
                collaborator_name: tables
                    .users
                    .iter()
                    .find(|u| u.id == op.collaborator_id)
                    .map(|u| u.name.clone()),
                status: op.status,
                operation_date: op.operation_date,
            })
            .collect())
    }

    async fn set_device_status(&self, device_id: i64, status: DeviceStatus) -> StoreResult<()> {
        let mut tables = self.tables()?;
        if let Some(device) = tables.devices.iter_mut().find(|d| d.id == device_id) {
            device.status = status;
        }
        Ok(())
    }

    async fn commit_release(
        &self,
        device_id: i64,
        collaborator_id: i64,
        at: DateTime<Utc>,
    ) -> StoreResult<Operation> {
        let mut tables = self.tables()?;
        let device = tables
            .devices
            .iter_mut()
            .find(|d| d.id == device_id)
            .ok_or_else(|| StoreError::new(format!("device {device_id} vanished")))?;
        device.status = DeviceStatus::InOperation;

        let operation = Operation {
            id: tables.next_id(),
            device_id,
            collaborator_id,
            status: OperationStatus::Released,
            operation_date: at,
        };
        tables.operations.push(operation.clone());
        Ok(operation)
    }

    async fn commit_return(&self, device_id: i64, operation_id: i64) -> StoreResult<Operation> {
        let mut tables = self.tables()?;
        if !tables.operations.iter().any(|o| o.id == operation_id) {
            return Err(StoreError::new(format!("operation {operation_id} vanished")));
        }
        if let Some(device) = tables.devices.iter_mut().find(|d| d.id == device_id) {
            device.status = DeviceStatus::Available;
        }
        let operation = tables
            .operations
            .iter_mut()
            .find(|o| o.id == operation_id)
            .ok_or_else(|| StoreError::new(format!("operation {operation_id} vanished")))?;
        operation.status = OperationStatus::Finished;
        Ok(operation.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[tokio::test]
    async fn test_lookups_by_key() {
        let store = MemoryStore::new();
        let ana = store.add_user("Ana", "1234", "pw", Role::Supervisor);
        let c01 = store.add_device("C-01", DeviceStatus::Available);

        assert_eq!(store.find_user(ana).await.unwrap().unwrap().name, "Ana");
        assert_eq!(store.find_user_by_badge("1234").await.unwrap().unwrap().id, ana);
        assert!(store.find_user_by_badge("9999").await.unwrap().is_none());
        assert_eq!(store.find_device_by_number("C-01").await.unwrap().unwrap().id, c01);
        assert!(store.find_device(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_devices_by_status() {
        let store = MemoryStore::new();
        store.add_device("C-01", DeviceStatus::Available);
        store.add_device("C-02", DeviceStatus::InOperation);
        store.add_device("C-03", DeviceStatus::InOperation);

        assert_eq!(store.list_devices(None).await.unwrap().len(), 3);
        let busy = store.list_devices(Some(DeviceStatus::InOperation)).await.unwrap();
        assert_eq!(busy.len(), 2);
        assert!(busy.iter().all(|d| d.status == DeviceStatus::InOperation));
    }

    #[tokio::test]
    async fn test_commit_release_then_return() {
        let store = MemoryStore::new();
        let user = store.add_user("Ana", "1234", "pw", Role::Supervisor);
        let device = store.add_device("C-01", DeviceStatus::Available);
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 8, 0, 0).unwrap();

        let op = store.commit_release(device, user, at).await.unwrap();
        assert_eq!(op.status, OperationStatus::Released);
        assert_eq!(store.released_operations(device).await.unwrap(), vec![op.clone()]);
        assert_eq!(store.devices()[0].status, DeviceStatus::InOperation);

        let finished = store.commit_return(device, op.id).await.unwrap();
        assert_eq!(finished.status, OperationStatus::Finished);
        assert!(store.released_operations(device).await.unwrap().is_empty());
        assert_eq!(store.devices()[0].status, DeviceStatus::Available);
    }

    #[tokio::test]
    async fn test_records_expand_names() {
        let store = MemoryStore::new();
        let user = store.add_user("Ana", "1234", "pw", Role::Supervisor);
        let device = store.add_device("C-01", DeviceStatus::InOperation);
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 8, 0, 0).unwrap();
        store.add_operation(device, user, OperationStatus::Released, at);
        store.add_operation(device, 404, OperationStatus::Finished, at);

        let records = store.list_operation_records().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].collaborator_display(), "Ana");
        assert_eq!(records[0].device_number.as_deref(), Some("C-01"));
        assert_eq!(records[1].collaborator_display(), "Unknown");
    }

    #[tokio::test]
    async fn test_offline_store_fails_every_call() {
        let store = MemoryStore::new();
        store.add_device("C-01", DeviceStatus::Available);
        store.set_offline(true);

        let err = store.list_devices(None).await.unwrap_err();
        assert_eq!(err.message(), "store unavailable");

        store.set_offline(false);
        assert_eq!(store.list_devices(None).await.unwrap().len(), 1);
    }
}

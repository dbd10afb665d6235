//! # RemoteStore: typed point queries against the three tables
//!
//! The dashboard never keeps table data locally; every action is a short chain
//! of calls through this trait. Reads are equality lookups or full-table
//! listings, writes are single-row updates and inserts.
//!
//! ## Reads
//!
//! | Method | Query |
//! |--------|-------|
//! | [`find_user`](RemoteStore::find_user) | `users` by `id` |
//! | [`find_user_by_badge`](RemoteStore::find_user_by_badge) | `users` by `badge_number` |
//! | [`find_device`](RemoteStore::find_device) | `devices` by `id` |
//! | [`find_device_by_number`](RemoteStore::find_device_by_number) | `devices` by `device_number` |
//! | [`list_devices`](RemoteStore::list_devices) | `devices`, optionally by `status` |
//! | [`released_operations`](RemoteStore::released_operations) | `operations` by `device_id` and `status = released` |
//! | [`list_operation_records`](RemoteStore::list_operation_records) | every operation with its collaborator's name |
//!
//! ## Writes
//!
//! [`commit_release`](RemoteStore::commit_release) and
//! [`commit_return`](RemoteStore::commit_return) each carry the two writes of
//! one lifecycle step. Backends that support transactions must apply both or
//! neither; the others apply them in order and may leave a half-done step
//! behind, which [`set_device_status`](RemoteStore::set_device_status) (the
//! administrative override) repairs.
//!
//! Implementations: [`crate::MemoryStore`] here and `PgStore` in the `api`
//! crate.

use std::future::Future;

use chrono::{DateTime, Utc};

use crate::error::StoreResult;
use crate::models::{Device, DeviceStatus, Operation, OperationRecord, User};

/// Async access to the `users`, `devices` and `operations` tables.
pub trait RemoteStore: Send + Sync {
    fn find_user(&self, id: i64) -> impl Future<Output = StoreResult<Option<User>>> + Send;

    fn find_user_by_badge(
        &self,
        badge_number: &str,
    ) -> impl Future<Output = StoreResult<Option<User>>> + Send;

    fn find_device(&self, id: i64) -> impl Future<Output = StoreResult<Option<Device>>> + Send;

    fn find_device_by_number(
        &self,
        device_number: &str,
    ) -> impl Future<Output = StoreResult<Option<Device>>> + Send;

    /// All devices, or only those in `status` when given.
    fn list_devices(
        &self,
        status: Option<DeviceStatus>,
    ) -> impl Future<Output = StoreResult<Vec<Device>>> + Send;

    /// Every `released` operation referencing the device. Normally zero or one.
    fn released_operations(
        &self,
        device_id: i64,
    ) -> impl Future<Output = StoreResult<Vec<Operation>>> + Send;

    fn list_operation_records(
        &self,
    ) -> impl Future<Output = StoreResult<Vec<OperationRecord>>> + Send;

    fn set_device_status(
        &self,
        device_id: i64,
        status: DeviceStatus,
    ) -> impl Future<Output = StoreResult<()>> + Send;

    /// Mark the device `in_operation` and insert a `released` operation.
    fn commit_release(
        &self,
        device_id: i64,
        collaborator_id: i64,
        at: DateTime<Utc>,
    ) -> impl Future<Output = StoreResult<Operation>> + Send;

    /// Mark the device `available` and the operation `finished`.
    fn commit_return(
        &self,
        device_id: i64,
        operation_id: i64,
    ) -> impl Future<Output = StoreResult<Operation>> + Send;
}

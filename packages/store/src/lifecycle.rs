//! # Device lifecycle controller
//!
//! [`Lifecycle`] owns the rules that keep a device's `status` in step with the
//! operation log:
//!
//! ```text
//! Device:     available ──release──▶ in_operation ──return / override──▶ available
//! Operation:  released ──return──▶ finished (terminal)
//! ```
//!
//! Every action validates its input first, then runs its lookups, and only
//! touches the store's write methods once every guard has passed. A failed
//! guard therefore never leaves a partial write behind.
//!
//! Two concurrent releases of the same available device are not prevented;
//! both can pass the availability guard before either commit lands.

use chrono::Utc;

use crate::error::{LifecycleError, Result};
use crate::models::{
    Collaborator, Device, DeviceStatus, Indicators, Operation, OperationRecord, ReturnPreview,
    SessionUser,
};
use crate::remote::RemoteStore;

/// Release, return and override actions over a [`RemoteStore`].
#[derive(Clone, Debug)]
pub struct Lifecycle<S> {
    store: S,
}

impl<S: RemoteStore> Lifecycle<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Check badge and password and return the identity to persist.
    ///
    /// Only supervisors may open the dashboard.
    pub async fn authenticate(&self, badge_number: &str, password: &str) -> Result<SessionUser> {
        let badge_number = required(badge_number, "Enter the badge number")?;
        if password.is_empty() {
            return Err(LifecycleError::validation("Enter the password"));
        }

        let user = self
            .store
            .find_user_by_badge(badge_number)
            .await?
            .filter(|user| user.password == password)
            .ok_or(LifecycleError::InvalidCredentials)?;

        if !user.is_supervisor() {
            tracing::warn!(badge_number, "login refused for non-supervisor");
            return Err(LifecycleError::AccessDenied);
        }

        tracing::info!(user_id = user.id, "supervisor logged in");
        Ok(user.to_session())
    }

    /// Resolve a badge number to the collaborator it belongs to.
    pub async fn lookup_collaborator(&self, badge_number: &str) -> Result<Collaborator> {
        let badge_number = required(badge_number, "Enter the badge number")?;
        let user = self
            .store
            .find_user_by_badge(badge_number)
            .await?
            .ok_or_else(|| LifecycleError::not_found("Collaborator not found"))?;
        Ok(user.to_collaborator())
    }

    /// Check an available device out to the collaborator with `badge_number`.
    pub async fn release(&self, badge_number: &str, device_number: &str) -> Result<Operation> {
        let badge_number = required(badge_number, "Fill in all fields")?;
        let device_number = required(device_number, "Fill in all fields")?;

        let collaborator = self.lookup_collaborator(badge_number).await?;

        let device = self
            .store
            .find_device_by_number(device_number)
            .await?
            .ok_or_else(|| LifecycleError::not_found("Device not found"))?;
        if !device.is_available() {
            tracing::warn!(device_number, status = %device.status, "release refused");
            return Err(LifecycleError::conflict("Device not available"));
        }

        let operation = self
            .store
            .commit_release(device.id, collaborator.id, Utc::now())
            .await
            .inspect_err(|e| tracing::error!(device_number, "release commit failed: {e}"))?;

        tracing::info!(
            device_number,
            collaborator_id = collaborator.id,
            operation_id = operation.id,
            "device released"
        );
        Ok(operation)
    }

    /// Find the open operation for a device and the collaborator holding it.
    pub async fn preview_return(&self, device_number: &str) -> Result<ReturnPreview> {
        let device_number = required(device_number, "Enter the device number")?;
        let not_in_operation =
            || LifecycleError::not_found("Device not found or not in operation");

        let device = self
            .store
            .find_device_by_number(device_number)
            .await?
            .ok_or_else(not_in_operation)?;

        // Exactly one open operation is expected; none or several are both a miss.
        let mut open = self.store.released_operations(device.id).await?;
        if open.len() != 1 {
            if open.len() > 1 {
                tracing::warn!(device_number, count = open.len(), "several open operations");
            }
            return Err(not_in_operation());
        }
        let operation = open.remove(0);

        let collaborator = self
            .store
            .find_user(operation.collaborator_id)
            .await?
            .ok_or_else(|| LifecycleError::not_found("Associated collaborator not found"))?
            .to_collaborator();

        Ok(ReturnPreview {
            device,
            operation,
            collaborator,
        })
    }

    /// Return a device: it becomes available and its operation finished.
    pub async fn return_device(&self, device_number: &str) -> Result<ReturnPreview> {
        let preview = self.preview_return(device_number).await?;

        let operation = self
            .store
            .commit_return(preview.device.id, preview.operation.id)
            .await
            .inspect_err(|e| tracing::error!(device_number, "return commit failed: {e}"))?;

        tracing::info!(
            device_number,
            operation_id = operation.id,
            "device returned"
        );
        Ok(ReturnPreview {
            operation,
            device: Device {
                status: DeviceStatus::Available,
                ..preview.device
            },
            collaborator: preview.collaborator,
        })
    }

    /// Devices currently checked out.
    pub async fn list_open_devices(&self) -> Result<Vec<Device>> {
        Ok(self
            .store
            .list_devices(Some(DeviceStatus::InOperation))
            .await?)
    }

    /// Administrative override: make a device available without touching the
    /// operation log. Returns whether the status actually changed.
    pub async fn force_available(&self, device_id: i64) -> Result<bool> {
        let device = self
            .store
            .find_device(device_id)
            .await?
            .ok_or_else(|| LifecycleError::not_found("Device not found"))?;
        if device.is_available() {
            return Ok(false);
        }

        self.store
            .set_device_status(device.id, DeviceStatus::Available)
            .await?;
        tracing::info!(device_number = %device.device_number, "device forced available");
        Ok(true)
    }

    /// Override every in-operation device. Returns how many were flipped.
    pub async fn force_all_available(&self) -> Result<usize> {
        let open = self.list_open_devices().await?;
        for device in &open {
            self.store
                .set_device_status(device.id, DeviceStatus::Available)
                .await?;
        }
        tracing::info!(count = open.len(), "all open devices forced available");
        Ok(open.len())
    }

    pub async fn indicators(&self) -> Result<Indicators> {
        let devices = self.store.list_devices(None).await?;
        Ok(Indicators::count(&devices))
    }

    pub async fn operation_records(&self) -> Result<Vec<OperationRecord>> {
        Ok(self.store.list_operation_records().await?)
    }
}

fn required<'a>(value: &'a str, message: &str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(LifecycleError::validation(message))
    } else {
        Ok(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{StoreError, StoreResult};
    use crate::models::{OperationStatus, Role, User};
    use crate::MemoryStore;
    use chrono::DateTime;

    struct Fixture {
        store: MemoryStore,
        lifecycle: Lifecycle<MemoryStore>,
        ana: i64,
        c01: i64,
    }

    fn fixture() -> Fixture {
        let store = MemoryStore::new();
        let ana = store.add_user("Ana", "1234", "secret", Role::Supervisor);
        store.add_user("Bruno", "5678", "secret", Role::from("operator"));
        let c01 = store.add_device("C-01", DeviceStatus::Available);
        store.add_device("C-02", DeviceStatus::Available);
        Fixture {
            lifecycle: Lifecycle::new(store.clone()),
            store,
            ana,
            c01,
        }
    }

    /// in_operation iff a released operation references the device.
    fn assert_consistent(store: &MemoryStore) {
        let operations = store.operations();
        for device in store.devices() {
            let open = operations
                .iter()
                .filter(|o| o.device_id == device.id && o.is_open())
                .count();
            assert!(open <= 1, "{} has {open} open operations", device.device_number);
            assert_eq!(
                device.status == DeviceStatus::InOperation,
                open == 1,
                "{} is {} with {open} open operations",
                device.device_number,
                device.status
            );
        }
    }

    #[tokio::test]
    async fn test_release_available_device() {
        let f = fixture();

        let op = f.lifecycle.release("1234", "C-01").await.unwrap();

        assert_eq!(op.status, OperationStatus::Released);
        assert_eq!(op.device_id, f.c01);
        assert_eq!(op.collaborator_id, f.ana);
        assert_eq!(f.store.operations(), vec![op]);
        let c01 = f.store.devices().into_iter().find(|d| d.id == f.c01).unwrap();
        assert_eq!(c01.status, DeviceStatus::InOperation);
        assert_consistent(&f.store);
    }

    #[tokio::test]
    async fn test_return_after_release() {
        let f = fixture();
        let released = f.lifecycle.release("1234", "C-01").await.unwrap();

        let returned = f.lifecycle.return_device("C-01").await.unwrap();

        assert_eq!(returned.operation.id, released.id);
        assert_eq!(returned.operation.status, OperationStatus::Finished);
        assert_eq!(returned.collaborator.name, "Ana");
        assert_eq!(returned.device.status, DeviceStatus::Available);
        assert_eq!(f.store.operations()[0].status, OperationStatus::Finished);
        assert!(f.store.devices().iter().all(|d| d.is_available()));
        assert_consistent(&f.store);
    }

    #[tokio::test]
    async fn test_release_unknown_badge_is_not_found() {
        let f = fixture();

        let err = f.lifecycle.release("9999", "C-01").await.unwrap_err();

        assert!(matches!(err, LifecycleError::NotFound(_)));
        assert!(f.store.operations().is_empty());
        assert!(f.store.devices().iter().all(|d| d.is_available()));
    }

    #[tokio::test]
    async fn test_release_unknown_device_is_not_found() {
        let f = fixture();

        let err = f.lifecycle.release("1234", "C-99").await.unwrap_err();

        assert_eq!(err, LifecycleError::not_found("Device not found"));
        assert!(f.store.operations().is_empty());
    }

    #[tokio::test]
    async fn test_release_busy_device_is_conflict() {
        let f = fixture();
        f.lifecycle.release("1234", "C-01").await.unwrap();
        let before_ops = f.store.operations();
        let before_devices = f.store.devices();

        let err = f.lifecycle.release("5678", "C-01").await.unwrap_err();

        assert!(matches!(err, LifecycleError::StateConflict(_)));
        assert_eq!(f.store.operations(), before_ops);
        assert_eq!(f.store.devices(), before_devices);
        assert_consistent(&f.store);
    }

    #[tokio::test]
    async fn test_empty_inputs_fail_before_store() {
        let f = fixture();
        f.store.set_offline(true);

        for (badge, device) in [("", "C-01"), ("1234", ""), ("  ", "C-01")] {
            let err = f.lifecycle.release(badge, device).await.unwrap_err();
            assert!(matches!(err, LifecycleError::Validation(_)), "{badge:?}/{device:?}");
        }
        let err = f.lifecycle.preview_return("").await.unwrap_err();
        assert!(matches!(err, LifecycleError::Validation(_)));
        let err = f.lifecycle.lookup_collaborator("").await.unwrap_err();
        assert!(matches!(err, LifecycleError::Validation(_)));
    }

    #[tokio::test]
    async fn test_return_without_open_operation_is_not_found() {
        let f = fixture();

        let err = f.lifecycle.return_device("C-01").await.unwrap_err();

        assert!(matches!(err, LifecycleError::NotFound(_)));
        assert!(f.store.operations().is_empty());
        assert!(f.store.devices().iter().all(|d| d.is_available()));
    }

    #[tokio::test]
    async fn test_return_with_two_open_operations_is_not_found() {
        let f = fixture();
        f.store.set_device_status(f.c01, DeviceStatus::InOperation).await.unwrap();
        f.store.add_operation(f.c01, f.ana, OperationStatus::Released, Utc::now());
        f.store.add_operation(f.c01, f.ana, OperationStatus::Released, Utc::now());
        let before = f.store.operations();

        let err = f.lifecycle.return_device("C-01").await.unwrap_err();

        assert!(matches!(err, LifecycleError::NotFound(_)));
        assert_eq!(f.store.operations(), before);
    }

    #[tokio::test]
    async fn test_preview_names_the_holder() {
        let f = fixture();
        f.lifecycle.release("5678", "C-02").await.unwrap();

        let preview = f.lifecycle.preview_return("C-02").await.unwrap();

        assert_eq!(preview.collaborator.name, "Bruno");
        assert_eq!(preview.device.device_number, "C-02");
        assert!(preview.operation.is_open());
        // Previewing writes nothing.
        assert_eq!(preview.device.status, DeviceStatus::InOperation);
        assert_consistent(&f.store);
    }

    #[tokio::test]
    async fn test_lookup_collaborator() {
        let f = fixture();

        let found = f.lifecycle.lookup_collaborator(" 1234 ").await.unwrap();
        assert_eq!(found, Collaborator { id: f.ana, name: "Ana".to_string() });

        let err = f.lifecycle.lookup_collaborator("0000").await.unwrap_err();
        assert_eq!(err.to_string(), "Collaborator not found");
    }

    #[tokio::test]
    async fn test_force_available_is_idempotent() {
        let f = fixture();

        assert!(!f.lifecycle.force_available(f.c01).await.unwrap());
        assert!(f.store.operations().is_empty());
        assert!(f.store.devices().iter().all(|d| d.is_available()));
    }

    #[tokio::test]
    async fn test_force_available_leaves_operations_alone() {
        let f = fixture();
        let op = f.lifecycle.release("1234", "C-01").await.unwrap();

        assert!(f.lifecycle.force_available(f.c01).await.unwrap());

        assert!(f.store.devices().iter().all(|d| d.is_available()));
        assert_eq!(f.store.operations(), vec![op]);
    }

    #[tokio::test]
    async fn test_forced_device_can_be_released_again() {
        let f = fixture();
        f.lifecycle.release("1234", "C-01").await.unwrap();
        f.lifecycle.force_available(f.c01).await.unwrap();

        // The stale released operation plus a new one: return can't pick either.
        let second = f.lifecycle.release("5678", "C-01").await.unwrap();
        assert_eq!(second.status, OperationStatus::Released);
        assert_eq!(f.store.operations().len(), 2);

        let err = f.lifecycle.return_device("C-01").await.unwrap_err();
        assert_eq!(err, LifecycleError::not_found("Device not found or not in operation"));
    }

    #[tokio::test]
    async fn test_force_available_unknown_device() {
        let f = fixture();
        let err = f.lifecycle.force_available(12345).await.unwrap_err();
        assert!(matches!(err, LifecycleError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_force_all_available() {
        let f = fixture();
        f.lifecycle.release("1234", "C-01").await.unwrap();
        f.lifecycle.release("5678", "C-02").await.unwrap();
        assert_eq!(f.lifecycle.list_open_devices().await.unwrap().len(), 2);

        assert_eq!(f.lifecycle.force_all_available().await.unwrap(), 2);
        assert!(f.lifecycle.list_open_devices().await.unwrap().is_empty());
        assert_eq!(f.lifecycle.force_all_available().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_indicators_follow_mutations() {
        let f = fixture();
        assert_eq!(
            f.lifecycle.indicators().await.unwrap(),
            Indicators { available: 2, in_operation: 0 }
        );

        f.lifecycle.release("1234", "C-01").await.unwrap();
        assert_eq!(
            f.lifecycle.indicators().await.unwrap(),
            Indicators { available: 1, in_operation: 1 }
        );

        f.lifecycle.return_device("C-01").await.unwrap();
        assert_eq!(
            f.lifecycle.indicators().await.unwrap(),
            Indicators { available: 2, in_operation: 0 }
        );
    }

    #[tokio::test]
    async fn test_authenticate_supervisor() {
        let f = fixture();

        let user = f.lifecycle.authenticate("1234", "secret").await.unwrap();

        assert_eq!(user.id, f.ana);
        assert_eq!(user.name, "Ana");
        assert!(user.is_supervisor());
    }

    #[tokio::test]
    async fn test_authenticate_rejections() {
        let f = fixture();

        assert_eq!(
            f.lifecycle.authenticate("1234", "wrong").await.unwrap_err(),
            LifecycleError::InvalidCredentials
        );
        assert_eq!(
            f.lifecycle.authenticate("0000", "secret").await.unwrap_err(),
            LifecycleError::InvalidCredentials
        );
        assert_eq!(
            f.lifecycle.authenticate("5678", "secret").await.unwrap_err(),
            LifecycleError::AccessDenied
        );
        assert!(matches!(
            f.lifecycle.authenticate("1234", "").await.unwrap_err(),
            LifecycleError::Validation(_)
        ));
    }

    /// Reads go to the memory store; both commits fail.
    struct FailingCommits(MemoryStore);

    impl RemoteStore for FailingCommits {
        async fn find_user(&self, id: i64) -> StoreResult<Option<User>> {
            self.0.find_user(id).await
        }

        async fn find_user_by_badge(&self, badge_number: &str) -> StoreResult<Option<User>> {
            self.0.find_user_by_badge(badge_number).await
        }

        async fn find_device(&self, id: i64) -> StoreResult<Option<Device>> {
            self.0.find_device(id).await
        }

        async fn find_device_by_number(&self, device_number: &str) -> StoreResult<Option<Device>> {
            self.0.find_device_by_number(device_number).await
        }

        async fn list_devices(&self, status: Option<DeviceStatus>) -> StoreResult<Vec<Device>> {
            self.0.list_devices(status).await
        }

        async fn released_operations(&self, device_id: i64) -> StoreResult<Vec<Operation>> {
            self.0.released_operations(device_id).await
        }

        async fn list_operation_records(&self) -> StoreResult<Vec<OperationRecord>> {
            self.0.list_operation_records().await
        }

        async fn set_device_status(&self, device_id: i64, status: DeviceStatus) -> StoreResult<()> {
            self.0.set_device_status(device_id, status).await
        }

        async fn commit_release(
            &self,
            _device_id: i64,
            _collaborator_id: i64,
            _at: DateTime<Utc>,
        ) -> StoreResult<Operation> {
            Err(StoreError::new("connection reset"))
        }

        async fn commit_return(&self, _device_id: i64, _operation_id: i64) -> StoreResult<Operation> {
            Err(StoreError::new("connection reset"))
        }
    }

    #[tokio::test]
    async fn test_failed_commit_is_remote_and_writes_nothing() {
        let f = fixture();
        f.lifecycle.release("1234", "C-01").await.unwrap();
        let before = f.store.operations();
        let failing = Lifecycle::new(FailingCommits(f.store.clone()));

        let err = failing.release("1234", "C-02").await.unwrap_err();
        assert_eq!(err, LifecycleError::Remote(StoreError::new("connection reset")));

        let err = failing.return_device("C-01").await.unwrap_err();
        assert_eq!(err.to_string(), "store error: connection reset");

        assert_eq!(f.store.operations(), before);
        assert_consistent(&f.store);
    }

    #[tokio::test]
    async fn test_store_failure_surfaces_as_remote() {
        let f = fixture();
        f.store.set_offline(true);

        let err = f.lifecycle.release("1234", "C-01").await.unwrap_err();
        assert!(matches!(err, LifecycleError::Remote(_)));
        assert_eq!(err.to_string(), "store error: store unavailable");

        f.store.set_offline(false);
        assert!(f.store.operations().is_empty());
    }
}

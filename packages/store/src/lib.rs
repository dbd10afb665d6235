pub mod config;
pub mod error;
pub mod lifecycle;
pub mod models;
pub mod remote;
pub mod report;

mod memory;
pub use memory::MemoryStore;

pub use config::DashboardConfig;
pub use error::{LifecycleError, StoreError};
pub use lifecycle::Lifecycle;
pub use models::{
    Collaborator, Device, DeviceStatus, Indicators, Operation, OperationRecord,
    OperationStatus, ReturnPreview, Role, SessionUser, User,
};
pub use remote::RemoteStore;
pub use report::{filter_by_date, Page};

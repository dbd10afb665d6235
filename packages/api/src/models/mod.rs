//! Database rows and their conversion into the typed `store` records.
//!
//! Status and role columns are plain `TEXT` in PostgreSQL; each row type parses
//! them here so that an unexpected value is reported as a store error instead of
//! leaking further in.

#[cfg(feature = "server")]
mod device;
#[cfg(feature = "server")]
mod operation;
#[cfg(feature = "server")]
mod user;

#[cfg(feature = "server")]
pub use device::DeviceRow;
#[cfg(feature = "server")]
pub use operation::{OperationRecordRow, OperationRow};
#[cfg(feature = "server")]
pub use user::UserRow;

//! Session gate: the persisted identity and the supervisor check.

#[cfg(feature = "server")]
mod session;

#[cfg(feature = "server")]
pub use session::{clear_session, current_user, require_supervisor, store_user, SESSION_USER_KEY};

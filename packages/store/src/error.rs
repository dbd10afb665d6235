//! Error types shared by the store backends and the lifecycle controller.

use thiserror::Error;

/// Failure reported by a [`crate::RemoteStore`] backend.
///
/// Backends do not distinguish network, query or decoding failures for the
/// caller; everything collapses to a message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct StoreError {
    message: String,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Every way a dashboard action can fail.
///
/// The `Display` text is what the user sees in the toast, so keep it short.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    /// A required input was missing; raised before any store call.
    #[error("{0}")]
    Validation(String),
    /// A lookup returned no row, or more than one where exactly one was expected.
    #[error("{0}")]
    NotFound(String),
    /// The entity exists but is not in the state the action requires.
    #[error("{0}")]
    StateConflict(String),
    #[error("store error: {0}")]
    Remote(#[from] StoreError),
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Access restricted to supervisors")]
    AccessDenied,
}

impl LifecycleError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::StateConflict(message.into())
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
pub type Result<T> = std::result::Result<T, LifecycleError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn failing_read() -> StoreResult<u32> {
        Err(StoreError::new("store unavailable"))
    }

    fn lifecycle_step() -> Result<u32> {
        let value = failing_read()?;
        Ok(value + 1)
    }

    #[test]
    fn test_store_error_converts_into_remote() {
        let err = lifecycle_step().unwrap_err();
        assert_eq!(err, LifecycleError::Remote(StoreError::new("store unavailable")));
        assert_eq!(err.to_string(), "store error: store unavailable");
    }

    #[test]
    fn test_helpers_pick_the_variant() {
        assert_eq!(LifecycleError::validation("x"), LifecycleError::Validation("x".into()));
        assert_eq!(LifecycleError::not_found("x"), LifecycleError::NotFound("x".into()));
        assert_eq!(LifecycleError::conflict("x"), LifecycleError::StateConflict("x".into()));
    }
}

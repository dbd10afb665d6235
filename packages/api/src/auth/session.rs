//! Session helpers over `tower_sessions`.
//!
//! The logged-in identity is one [`SessionUser`] blob stored under
//! [`SESSION_USER_KEY`]. It is written at login, read by every guarded server
//! function and flushed at logout.

use dioxus::prelude::ServerFnError;
use store::SessionUser;
use tower_sessions::Session;

/// Key for storing the logged-in user in the session.
pub const SESSION_USER_KEY: &str = "user";

/// The identity stored in the session, if any.
pub async fn current_user(session: &Session) -> Result<Option<SessionUser>, ServerFnError> {
    session
        .get(SESSION_USER_KEY)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

/// The session's user, provided they are a supervisor.
pub async fn require_supervisor(session: &Session) -> Result<SessionUser, ServerFnError> {
    match current_user(session).await? {
        Some(user) if user.is_supervisor() => Ok(user),
        Some(user) => {
            tracing::warn!(user_id = user.id, "non-supervisor session rejected");
            Err(ServerFnError::new("Not authenticated"))
        }
        None => Err(ServerFnError::new("Not authenticated")),
    }
}

pub async fn store_user(session: &Session, user: &SessionUser) -> Result<(), ServerFnError> {
    session
        .insert(SESSION_USER_KEY, user)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

pub async fn clear_session(session: &Session) -> Result<(), ServerFnError> {
    session
        .flush()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

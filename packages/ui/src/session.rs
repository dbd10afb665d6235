//! Session context and hooks for the UI.

use api::SessionUser;
use dioxus::prelude::*;

use crate::toast::{push_server_error, use_toasts};

/// Who is signed in, as last reported by the server.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub user: Option<SessionUser>,
    pub loading: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }
}

impl SessionState {
    /// State after a successful login.
    pub fn signed_in(user: SessionUser) -> Self {
        Self {
            user: Some(user),
            loading: false,
        }
    }

    /// State after logout or a failed session lookup.
    pub fn signed_out() -> Self {
        Self {
            user: None,
            loading: false,
        }
    }

    /// Only supervisors get past the dashboard gate.
    pub fn is_supervisor(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.is_supervisor())
    }
}

/// Get the current session state.
pub fn use_session() -> Signal<SessionState> {
    use_context::<Signal<SessionState>>()
}

/// Loads the persisted session identity once and shares it with the tree.
#[component]
pub fn SessionProvider(children: Element) -> Element {
    let mut session = use_signal(SessionState::default);

    let _ = use_resource(move || async move {
        match api::get_session_user().await {
            Ok(Some(user)) => session.set(SessionState::signed_in(user)),
            Ok(None) => session.set(SessionState::signed_out()),
            Err(e) => {
                tracing::warn!("session lookup failed: {}", e);
                session.set(SessionState::signed_out());
            }
        }
    });

    use_context_provider(|| session);

    rsx! {
        {children}
    }
}

/// Clears the server session, then the local state.
#[component]
pub fn LogoutButton(
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
    on_logout: EventHandler<()>,
) -> Element {
    let mut session = use_session();
    let mut toasts = use_toasts();

    let onclick = move |_| async move {
        match api::logout().await {
            Ok(()) => {
                session.set(SessionState::signed_out());
                on_logout.call(());
            }
            Err(e) => {
                tracing::error!("logout failed: {}", e);
                push_server_error(&mut toasts, &e);
            }
        }
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::Role;

    fn user(role: Role) -> SessionUser {
        SessionUser {
            id: 1,
            name: "Ana".to_string(),
            role,
        }
    }

    #[test]
    fn test_default_is_loading() {
        let state = SessionState::default();
        assert!(state.loading);
        assert!(state.user.is_none());
    }

    #[test]
    fn test_only_supervisors_pass() {
        assert!(SessionState::signed_in(user(Role::Supervisor)).is_supervisor());
        assert!(!SessionState::signed_in(user(Role::Other("operator".into()))).is_supervisor());
        assert!(!SessionState::signed_out().is_supervisor());
    }
}

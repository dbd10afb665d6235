//! Transient notifications shown in the corner of the dashboard.

use std::time::Duration;

use dioxus::prelude::*;

const TOAST_CSS: Asset = asset!("/assets/styling/toast.css");

/// How long a toast stays on screen.
pub const TOAST_TTL: Duration = Duration::from_secs(4);

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub level: ToastLevel,
    pub message: String,
}

#[derive(Clone, Debug, Default)]
pub struct Toasts {
    pub entries: Vec<Toast>,
    next_id: u64,
}

impl Toasts {
    /// Queue a toast and return its id.
    pub fn push(&mut self, level: ToastLevel, message: impl Into<String>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Toast {
            id,
            level,
            message: message.into(),
        });
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.entries.retain(|t| t.id != id);
    }
}

pub fn use_toasts() -> Signal<Toasts> {
    use_context::<Signal<Toasts>>()
}

/// Show a toast and schedule its removal after [`TOAST_TTL`].
pub fn push_toast(toasts: &mut Signal<Toasts>, level: ToastLevel, message: &str) {
    let id = toasts.write().push(level, message);
    let mut toasts = *toasts;
    spawn(async move {
        #[cfg(target_arch = "wasm32")]
        gloo_timers::future::sleep(TOAST_TTL).await;
        #[cfg(not(target_arch = "wasm32"))]
        tokio::time::sleep(TOAST_TTL).await;

        toasts.write().dismiss(id);
    });
}

/// Show a failed server call as an error toast.
///
/// Server-side errors carry the lifecycle message verbatim; transport
/// failures fall back to their display form.
pub fn push_server_error(toasts: &mut Signal<Toasts>, error: &ServerFnError) {
    push_toast(toasts, ToastLevel::Error, &server_message(error));
}

/// The text a failed server call shows to the user.
pub fn server_message(error: &ServerFnError) -> String {
    match error {
        ServerFnError::ServerError { message, .. } => message.clone(),
        other => other.to_string(),
    }
}

/// Owns the toast signal and renders the stack above its children.
#[component]
pub fn ToastProvider(children: Element) -> Element {
    let mut toasts = use_context_provider(|| Signal::new(Toasts::default()));
    let entries = toasts().entries.clone();

    rsx! {
        document::Stylesheet { href: TOAST_CSS }

        {children}

        div {
            class: "toast-stack",
            {entries.into_iter().map(|toast| {
                let id = toast.id;
                let class = match toast.level {
                    ToastLevel::Error => "toast error",
                    ToastLevel::Success => "toast success",
                    ToastLevel::Info => "toast info",
                };
                rsx! {
                    div {
                        key: "{id}",
                        class,
                        onclick: move |_| toasts.write().dismiss(id),
                        "{toast.message}"
                    }
                }
            })}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique_and_dismiss_removes_one() {
        let mut toasts = Toasts::default();
        let a = toasts.push(ToastLevel::Error, "Device not found");
        let b = toasts.push(ToastLevel::Success, "Device released");
        assert_ne!(a, b);

        toasts.dismiss(a);
        assert_eq!(toasts.entries.len(), 1);
        assert_eq!(toasts.entries[0].message, "Device released");

        toasts.dismiss(a);
        assert_eq!(toasts.entries.len(), 1);
    }

    #[test]
    fn test_server_message_is_shown_verbatim() {
        let error = ServerFnError::new("Not authenticated");
        assert_eq!(server_message(&error), "Not authenticated");
    }
}

//! Login page: badge number and password.

use dioxus::prelude::*;
use ui::{push_server_error, push_toast, use_session, use_toasts, SessionState, ToastLevel};

use crate::Route;

/// Login page component.
#[component]
pub fn Login() -> Element {
    let mut session = use_session();
    let mut toasts = use_toasts();
    let nav = use_navigator();
    let mut badge_number = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut loading = use_signal(|| false);

    // Already signed in: go straight to the dashboard
    if !session().loading && session().is_supervisor() {
        nav.replace(Route::Dashboard {});
    }

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let badge = badge_number().trim().to_string();
        let secret = password();
        if badge.is_empty() || secret.is_empty() {
            push_toast(&mut toasts, ToastLevel::Error, "Fill in all fields");
            return;
        }
        spawn(async move {
            loading.set(true);
            match api::login(badge, secret).await {
                Ok(user) => {
                    session.set(SessionState::signed_in(user));
                    nav.replace(Route::Dashboard {});
                }
                Err(e) => {
                    password.set(String::new());
                    push_server_error(&mut toasts, &e);
                }
            }
            loading.set(false);
        });
    };

    rsx! {
        div {
            class: "login-container",

            form {
                class: "login-card",
                onsubmit: submit,

                h1 { "CollectWise" }
                p { class: "login-subtitle", "Supervisor sign-in" }

                label { r#for: "login-badge", "Badge number" }
                input {
                    id: "login-badge",
                    r#type: "text",
                    autocomplete: "username",
                    value: badge_number(),
                    oninput: move |evt: FormEvent| badge_number.set(evt.value()),
                }

                label { r#for: "login-password", "Password" }
                input {
                    id: "login-password",
                    r#type: "password",
                    autocomplete: "current-password",
                    value: password(),
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                }

                button {
                    class: "btn btn-primary login-submit",
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Signing in..." } else { "Sign in" }
                }
            }
        }

        style {
            r#"
            .login-container {{
                display: flex;
                align-items: center;
                justify-content: center;
                min-height: 100vh;
                padding: 2rem;
            }}

            .login-card {{
                width: 100%;
                max-width: 320px;
                padding: 2rem;
                border-radius: 8px;
                background: var(--surface);
                box-shadow: 0 4px 16px rgba(0, 0, 0, 0.08);
            }}

            .login-card h1 {{
                margin: 0 0 0.25rem;
                font-size: 1.5rem;
            }}

            .login-subtitle {{
                margin: 0 0 1rem;
                color: var(--muted);
            }}

            .login-submit {{
                width: 100%;
                margin-top: 1.25rem;
            }}
            "#
        }
    }
}

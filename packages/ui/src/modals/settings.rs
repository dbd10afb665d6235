use dioxus::prelude::*;

use crate::icons::{FaMoon, FaSun};
use crate::session::{use_session, LogoutButton};
use crate::views::ModalOverlay;
use crate::Icon;

/// Theme toggle and logout.
#[component]
pub fn SettingsModal(
    mut dark_mode: Signal<bool>,
    on_close: EventHandler<()>,
    on_logout: EventHandler<()>,
) -> Element {
    let session = use_session();
    let name = session()
        .user
        .map(|u| u.name)
        .unwrap_or_default();

    rsx! {
        ModalOverlay {
            on_close: move |_| on_close.call(()),
            div {
                class: "modal-body",
                h2 { class: "modal-title", "Settings" }
                p { class: "modal-note", "Signed in as {name}" }

                button {
                    class: "btn settings-theme",
                    onclick: move |_| dark_mode.toggle(),
                    if dark_mode() {
                        Icon { icon: FaSun, width: 14, height: 14 }
                        " Light mode"
                    } else {
                        Icon { icon: FaMoon, width: 14, height: 14 }
                        " Dark mode"
                    }
                }

                div {
                    class: "modal-actions",
                    button {
                        class: "btn btn-ghost",
                        onclick: move |_| on_close.call(()),
                        "Close"
                    }
                    LogoutButton {
                        class: "btn btn-danger",
                        on_logout: move |_| on_logout.call(()),
                    }
                }
            }
        }
    }
}

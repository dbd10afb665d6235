use api::Collaborator;
use dioxus::prelude::*;

use crate::toast::{push_server_error, push_toast, use_toasts, ToastLevel};
use crate::views::ModalOverlay;

/// Two-step checkout: find the collaborator by badge, then name the device.
#[component]
pub fn ReleaseModal(on_close: EventHandler<()>, on_released: EventHandler<()>) -> Element {
    let mut toasts = use_toasts();
    let mut badge_number = use_signal(String::new);
    let mut device_number = use_signal(String::new);
    let mut collaborator = use_signal(|| Option::<Collaborator>::None);
    let mut loading = use_signal(|| false);

    let mut lookup = move || {
        let badge = badge_number().trim().to_string();
        if badge.is_empty() {
            push_toast(&mut toasts, ToastLevel::Error, "Enter the badge number");
            return;
        }
        spawn(async move {
            loading.set(true);
            match api::lookup_collaborator(badge).await {
                Ok(found) => collaborator.set(Some(found)),
                Err(e) => {
                    collaborator.set(None);
                    push_server_error(&mut toasts, &e);
                }
            }
            loading.set(false);
        });
    };

    let handle_release = move |_| {
        let badge = badge_number().trim().to_string();
        let device = device_number().trim().to_string();
        if badge.is_empty() || device.is_empty() {
            push_toast(&mut toasts, ToastLevel::Error, "Fill in all fields");
            return;
        }
        spawn(async move {
            loading.set(true);
            match api::release_device(badge, device.clone()).await {
                Ok(_) => {
                    push_toast(
                        &mut toasts,
                        ToastLevel::Success,
                        &format!("Device {device} released"),
                    );
                    on_released.call(());
                    on_close.call(());
                }
                Err(e) => push_server_error(&mut toasts, &e),
            }
            loading.set(false);
        });
    };

    rsx! {
        ModalOverlay {
            on_close: move |_| on_close.call(()),
            div {
                class: "modal-body",
                h2 { class: "modal-title", "Release device" }

                label { r#for: "release-badge", "Badge number" }
                div {
                    class: "modal-inline",
                    input {
                        id: "release-badge",
                        r#type: "text",
                        value: badge_number(),
                        oninput: move |evt: FormEvent| {
                            badge_number.set(evt.value());
                            collaborator.set(None);
                        },
                        onkeydown: move |evt: KeyboardEvent| {
                            if evt.key() == Key::Enter {
                                lookup();
                            }
                        },
                    }
                    button {
                        class: "btn",
                        disabled: loading(),
                        onclick: move |_| lookup(),
                        "Search"
                    }
                }

                if let Some(found) = collaborator() {
                    p { class: "modal-note", "Collaborator: {found.name}" }

                    label { r#for: "release-device", "Device number" }
                    input {
                        id: "release-device",
                        r#type: "text",
                        value: device_number(),
                        oninput: move |evt: FormEvent| device_number.set(evt.value()),
                    }
                }

                div {
                    class: "modal-actions",
                    button {
                        class: "btn btn-ghost",
                        onclick: move |_| on_close.call(()),
                        "Cancel"
                    }
                    button {
                        class: "btn btn-primary",
                        disabled: loading() || collaborator().is_none(),
                        onclick: handle_release,
                        if loading() { "Releasing..." } else { "Release" }
                    }
                }
            }
        }
    }
}

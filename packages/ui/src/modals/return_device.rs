use api::ReturnPreview;
use dioxus::prelude::*;

use crate::toast::{push_server_error, push_toast, use_toasts, ToastLevel};
use crate::views::ModalOverlay;

/// Look up who holds a device, then close its operation.
#[component]
pub fn ReturnModal(on_close: EventHandler<()>, on_returned: EventHandler<()>) -> Element {
    let mut toasts = use_toasts();
    let mut device_number = use_signal(String::new);
    let mut preview = use_signal(|| Option::<ReturnPreview>::None);
    let mut loading = use_signal(|| false);

    let mut search = move || {
        let device = device_number().trim().to_string();
        if device.is_empty() {
            push_toast(&mut toasts, ToastLevel::Error, "Enter the device number");
            return;
        }
        spawn(async move {
            loading.set(true);
            match api::preview_return(device).await {
                Ok(found) => preview.set(Some(found)),
                Err(e) => {
                    preview.set(None);
                    push_server_error(&mut toasts, &e);
                }
            }
            loading.set(false);
        });
    };

    let handle_return = move |_| {
        let device = device_number().trim().to_string();
        spawn(async move {
            loading.set(true);
            match api::return_device(device).await {
                Ok(done) => {
                    push_toast(
                        &mut toasts,
                        ToastLevel::Success,
                        &format!(
                            "Device {} returned by {}",
                            done.device.device_number, done.collaborator.name
                        ),
                    );
                    on_returned.call(());
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
                h2 { class: "modal-title", "Return device" }

                label { r#for: "return-device", "Device number" }
                div {
                    class: "modal-inline",
                    input {
                        id: "return-device",
                        r#type: "text",
                        value: device_number(),
                        oninput: move |evt: FormEvent| {
                            device_number.set(evt.value());
                            preview.set(None);
                        },
                        onkeydown: move |evt: KeyboardEvent| {
                            if evt.key() == Key::Enter {
                                search();
                            }
                        },
                    }
                    button {
                        class: "btn",
                        disabled: loading(),
                        onclick: move |_| search(),
                        "Search"
                    }
                }

                if let Some(found) = preview() {
                    div {
                        class: "modal-note",
                        p { "Collaborator: {found.collaborator.name}" }
                        p {
                            "Released at: "
                            {found.operation.operation_date.format("%Y-%m-%d %H:%M").to_string()}
                        }
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
                        disabled: loading() || preview().is_none(),
                        onclick: handle_return,
                        if loading() { "Returning..." } else { "Confirm return" }
                    }
                }
            }
        }
    }
}

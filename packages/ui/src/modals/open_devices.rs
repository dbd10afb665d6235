use api::Device;
use dioxus::prelude::*;
use store::Page;

use crate::toast::{push_server_error, push_toast, use_toasts, ToastLevel};
use crate::views::ModalOverlay;

/// Devices stuck in operation, with per-device and bulk overrides.
///
/// Overrides never touch the operation log, so a device forced back here
/// keeps its `released` operation.
#[component]
pub fn OpenDevicesModal(
    page_size: usize,
    on_close: EventHandler<()>,
    on_changed: EventHandler<()>,
) -> Element {
    let mut toasts = use_toasts();
    let mut page_index = use_signal(|| 0usize);
    let mut busy = use_signal(|| false);

    let mut devices = use_resource(move || async move {
        match api::list_open_devices().await {
            Ok(devices) => devices,
            Err(e) => {
                push_server_error(&mut toasts, &e);
                Vec::new()
            }
        }
    });

    let release_one = move |device: Device| {
        spawn(async move {
            busy.set(true);
            match api::force_available(device.id).await {
                Ok(true) => {
                    push_toast(
                        &mut toasts,
                        ToastLevel::Success,
                        &format!("Device {} is available", device.device_number),
                    );
                    on_changed.call(());
                }
                Ok(false) => push_toast(
                    &mut toasts,
                    ToastLevel::Info,
                    &format!("Device {} was already available", device.device_number),
                ),
                Err(e) => push_server_error(&mut toasts, &e),
            }
            busy.set(false);
            devices.restart();
        });
    };

    let release_all = move |_| {
        spawn(async move {
            busy.set(true);
            match api::force_all_available().await {
                Ok(count) => {
                    push_toast(
                        &mut toasts,
                        ToastLevel::Success,
                        &format!("{count} device(s) made available"),
                    );
                    page_index.set(0);
                    on_changed.call(());
                }
                Err(e) => push_server_error(&mut toasts, &e),
            }
            busy.set(false);
            devices.restart();
        });
    };

    let body = match devices() {
        None => rsx! { p { class: "modal-note", "Loading..." } },
        Some(all) => {
            // The list shrinks after an override; stay on the last page.
            let last = Page::slice(&all, 0, page_size).page_count() - 1;
            let page = Page::slice(&all, page_index().min(last), page_size);
            rsx! {
                if page.items.is_empty() {
                    p { class: "modal-note", "No devices in operation" }
                } else {
                    ul {
                        class: "device-list",
                        {page.items.iter().cloned().map(|device| {
                            let id = device.id;
                            let number = device.device_number.clone();
                            rsx! {
                                li {
                                    key: "{id}",
                                    span { "{number}" }
                                    button {
                                        class: "btn btn-small",
                                        disabled: busy(),
                                        onclick: move |_| release_one(device.clone()),
                                        "Available"
                                    }
                                }
                            }
                        })}
                    }
                }
                div {
                    class: "modal-pager",
                    button {
                        class: "btn",
                        disabled: !page.has_previous(),
                        onclick: move |_| page_index.set(page.index - 1),
                        "Previous"
                    }
                    span { "Page {page.index + 1} of {page.page_count()}" }
                    button {
                        class: "btn",
                        disabled: !page.has_next(),
                        onclick: move |_| page_index.set(page.index + 1),
                        "Next"
                    }
                }
                button {
                    class: "btn btn-danger",
                    disabled: busy() || all.is_empty(),
                    onclick: release_all,
                    "Make all available"
                }
            }
        }
    };

    rsx! {
        ModalOverlay {
            on_close: move |_| on_close.call(()),
            div {
                class: "modal-body",
                h2 { class: "modal-title", "Devices in operation" }

                {body}

                div {
                    class: "modal-actions",
                    button {
                        class: "btn btn-ghost",
                        onclick: move |_| on_close.call(()),
                        "Close"
                    }
                }
            }
        }
    }
}

use api::OperationRecord;
use dioxus::prelude::*;
use store::{filter_by_date, Page};

use crate::toast::{push_server_error, use_toasts};
use crate::views::ModalOverlay;

/// Read-only operation log with a date filter and paging.
#[component]
pub fn ReportModal(page_size: usize, on_close: EventHandler<()>) -> Element {
    let mut toasts = use_toasts();
    let mut date_filter = use_signal(String::new);
    let mut page_index = use_signal(|| 0usize);

    let records = use_resource(move || async move {
        match api::list_operations().await {
            Ok(records) => records,
            Err(e) => {
                push_server_error(&mut toasts, &e);
                Vec::new()
            }
        }
    });

    let body = match records() {
        None => rsx! { p { class: "modal-note", "Loading..." } },
        Some(all) => {
            let filtered: Vec<OperationRecord> = filter_by_date(&all, &date_filter())
                .into_iter()
                .cloned()
                .collect();
            let page = Page::slice(&filtered, page_index(), page_size);
            rsx! {
                if page.items.is_empty() {
                    p { class: "modal-note", "No operations found" }
                } else {
                    table {
                        class: "report-table",
                        thead {
                            tr {
                                th { "Device" }
                                th { "Collaborator" }
                                th { "Status" }
                                th { "Date" }
                            }
                        }
                        tbody {
                            for record in page.items.iter() {
                                tr {
                                    key: "{record.id}",
                                    td { "{record.device_display()}" }
                                    td { "{record.collaborator_display()}" }
                                    td { "{record.status}" }
                                    td { "{record.date_string()}" }
                                }
                            }
                        }
                    }
                }
                div {
                    class: "modal-pager",
                    button {
                        class: "btn",
                        disabled: !page.has_previous(),
                        onclick: move |_| page_index -= 1,
                        "Previous"
                    }
                    span { "Page {page.index + 1} of {page.page_count()}" }
                    button {
                        class: "btn",
                        disabled: !page.has_next(),
                        onclick: move |_| page_index += 1,
                        "Next"
                    }
                }
            }
        }
    };

    rsx! {
        ModalOverlay {
            on_close: move |_| on_close.call(()),
            div {
                class: "modal-body modal-wide",
                h2 { class: "modal-title", "Operations report" }

                label { r#for: "report-date", "Date (prefix, e.g. 2024-01-15)" }
                input {
                    id: "report-date",
                    r#type: "text",
                    placeholder: "YYYY-MM-DD",
                    value: date_filter(),
                    oninput: move |evt: FormEvent| {
                        date_filter.set(evt.value());
                        page_index.set(0);
                    },
                }

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

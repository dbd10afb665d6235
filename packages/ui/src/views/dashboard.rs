use dioxus::prelude::*;
use store::DashboardConfig;

use crate::icons::{FaArrowRightFromBracket, FaArrowRightToBracket, FaGear, FaListUl, FaTriangleExclamation};
use crate::indicators::IndicatorCards;
use crate::modals::{OpenDevicesModal, ReleaseModal, ReportModal, ReturnModal, SettingsModal};
use crate::session::use_session;
use crate::toast::{push_server_error, use_toasts};
use crate::Icon;

const DASHBOARD_CSS: Asset = asset!("/assets/styling/dashboard.css");

#[derive(Clone, Copy, Debug, PartialEq)]
enum DashboardModal {
    Release,
    Return,
    Report,
    OpenDevices,
    Settings,
}

/// Supervisor dashboard: counters, the four workflows and settings.
///
/// Indicators are fetched once on mount and again whenever a modal reports
/// a lifecycle change.
#[component]
pub fn DashboardView(on_logout: EventHandler<()>) -> Element {
    let mut toasts = use_toasts();
    let session = use_session();
    let mut modal = use_signal(|| Option::<DashboardModal>::None);
    let dark_mode = use_signal(|| false);

    let mut indicators = use_resource(move || async move {
        match api::get_indicators().await {
            Ok(counts) => counts,
            Err(e) => {
                push_server_error(&mut toasts, &e);
                Default::default()
            }
        }
    });

    let config = use_resource(|| async move {
        api::get_dashboard_config().await.unwrap_or_else(|e| {
            tracing::warn!("using default dashboard config: {}", e);
            DashboardConfig::default()
        })
    });
    let config = config().unwrap_or_default();

    let refresh = move |_| indicators.restart();
    let close = move |_| modal.set(None);
    let name = session().user.map(|u| u.name).unwrap_or_default();

    rsx! {
        document::Stylesheet { href: DASHBOARD_CSS }

        div {
            class: if dark_mode() { "dashboard dark" } else { "dashboard" },

            header {
                class: "dashboard-header",
                h1 { "CollectWise" }
                span { class: "dashboard-user", "{name}" }
                button {
                    class: "btn btn-icon",
                    title: "Settings",
                    onclick: move |_| modal.set(Some(DashboardModal::Settings)),
                    Icon { icon: FaGear, width: 16, height: 16 }
                }
            }

            {match indicators() {
                Some(counts) => rsx! { IndicatorCards { indicators: counts } },
                None => rsx! { p { class: "modal-note", "Loading..." } },
            }}

            div {
                class: "dashboard-actions",
                button {
                    class: "action-tile",
                    onclick: move |_| modal.set(Some(DashboardModal::Release)),
                    Icon { icon: FaArrowRightFromBracket, width: 22, height: 22 }
                    span { "Release" }
                }
                button {
                    class: "action-tile",
                    onclick: move |_| modal.set(Some(DashboardModal::Return)),
                    Icon { icon: FaArrowRightToBracket, width: 22, height: 22 }
                    span { "Return" }
                }
                button {
                    class: "action-tile",
                    onclick: move |_| modal.set(Some(DashboardModal::Report)),
                    Icon { icon: FaListUl, width: 22, height: 22 }
                    span { "Report" }
                }
                button {
                    class: "action-tile",
                    onclick: move |_| modal.set(Some(DashboardModal::OpenDevices)),
                    Icon { icon: FaTriangleExclamation, width: 22, height: 22 }
                    span { "Open devices" }
                }
            }

            {match modal() {
                Some(DashboardModal::Release) => rsx! {
                    ReleaseModal { on_close: close, on_released: refresh }
                },
                Some(DashboardModal::Return) => rsx! {
                    ReturnModal { on_close: close, on_returned: refresh }
                },
                Some(DashboardModal::Report) => rsx! {
                    ReportModal { page_size: config.report.page_size, on_close: close }
                },
                Some(DashboardModal::OpenDevices) => rsx! {
                    OpenDevicesModal {
                        page_size: config.open_devices.page_size,
                        on_close: close,
                        on_changed: refresh,
                    }
                },
                Some(DashboardModal::Settings) => rsx! {
                    SettingsModal {
                        dark_mode,
                        on_close: close,
                        on_logout: move |_| on_logout.call(()),
                    }
                },
                None => rsx! {},
            }}
        }
    }
}

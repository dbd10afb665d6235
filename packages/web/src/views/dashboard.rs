use dioxus::prelude::*;
use ui::use_session;
use ui::views::DashboardView;

use crate::Route;

/// Session gate in front of the dashboard.
#[component]
pub fn Dashboard() -> Element {
    let session = use_session();
    let nav = use_navigator();

    let state = session();
    if state.loading {
        return rsx! {
            div { class: "page-loading", "Loading..." }
        };
    }

    if !state.is_supervisor() {
        nav.replace(Route::Login {});
        return rsx! {};
    }

    rsx! {
        DashboardView {
            on_logout: move |_| {
                nav.replace(Route::Login {});
            },
        }
    }
}

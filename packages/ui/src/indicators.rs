use api::Indicators;
use dioxus::prelude::*;

use crate::icons::{FaCircleCheck, FaTruckFast};
use crate::Icon;

/// The two counters at the top of the dashboard.
#[component]
pub fn IndicatorCards(indicators: Indicators) -> Element {
    rsx! {
        div {
            class: "indicator-row",
            div {
                class: "indicator-card available",
                Icon { icon: FaCircleCheck, width: 28, height: 28 }
                div {
                    span { class: "indicator-value", "{indicators.available}" }
                    span { class: "indicator-label", "Available" }
                }
            }
            div {
                class: "indicator-card in-operation",
                Icon { icon: FaTruckFast, width: 28, height: 28 }
                div {
                    span { class: "indicator-value", "{indicators.in_operation}" }
                    span { class: "indicator-label", "In operation" }
                }
            }
        }
    }
}

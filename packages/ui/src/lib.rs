//! Shared UI for the CollectWise dashboard.

use dioxus::prelude::*;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub const MAIN_CSS: Asset = asset!("/assets/styling/main.css");

pub mod views;

pub mod modals;

mod indicators;
pub use indicators::IndicatorCards;

mod session;
pub use session::{use_session, LogoutButton, SessionProvider, SessionState};

pub mod toast;
pub use toast::{push_server_error, push_toast, server_message, use_toasts, ToastLevel, ToastProvider, Toasts};

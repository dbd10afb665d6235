//! Dashboard modals. Each one talks to the server on its own and reports
//! back through toasts plus an `on_*` callback for the indicator refresh.

mod open_devices;
mod release;
mod report;
mod return_device;
mod settings;

pub use open_devices::OpenDevicesModal;
pub use release::ReleaseModal;
pub use report::ReportModal;
pub use return_device::ReturnModal;
pub use settings::SettingsModal;

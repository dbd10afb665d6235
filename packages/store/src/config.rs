//! # Dashboard configuration: `collectwise.toml`
//!
//! Optional TOML file read by the server at startup
//! (filename: [`DashboardConfig::filename`] = `"collectwise.toml"`).
//!
//! ```toml
//! [report]
//! page_size = 10      # operations per report page
//!
//! [open_devices]
//! page_size = 6       # devices per page in the open-devices modal
//! ```
//!
//! Every field has a default, so a missing or empty file is equivalent to the
//! default configuration.

use serde::{Deserialize, Serialize};

/// Top-level configuration stored in `collectwise.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub open_devices: OpenDevicesConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_report_page_size")]
    pub page_size: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OpenDevicesConfig {
    #[serde(default = "default_open_devices_page_size")]
    pub page_size: usize,
}

fn default_report_page_size() -> usize {
    10
}

fn default_open_devices_page_size() -> usize {
    6
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            page_size: default_report_page_size(),
        }
    }
}

impl Default for OpenDevicesConfig {
    fn default() -> Self {
        Self {
            page_size: default_open_devices_page_size(),
        }
    }
}

impl DashboardConfig {
    /// Builder method to set the report page size.
    pub fn with_report_page_size(mut self, page_size: usize) -> Self {
        self.report.page_size = page_size;
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "collectwise.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

//! # Typed records for the three remote tables
//!
//! Each table row has one struct here, and every enumerated column has a Rust
//! enum with a stable snake_case wire name. Backends convert their raw rows into
//! these types at the store boundary, so a row with an unknown status never
//! reaches the lifecycle controller.
//!
//! | Struct | Table | Notes |
//! |--------|-------|-------|
//! | [`User`] | `users` | Server side only in practice; carries the password. |
//! | [`Device`] | `devices` | `status` is flipped by the lifecycle controller. |
//! | [`Operation`] | `operations` | One checkout episode, `released` until returned. |
//!
//! Client-safe projections: [`SessionUser`] (the persisted identity),
//! [`Collaborator`] (lookup result), [`OperationRecord`] (report row with the
//! collaborator name expanded), [`ReturnPreview`] and [`Indicators`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Role name that grants dashboard access.
pub const SUPERVISOR_ROLE: &str = "supervisor";

/// Display name used when an operation's collaborator cannot be resolved.
pub const UNKNOWN_COLLABORATOR: &str = "Unknown";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceStatus {
    Available,
    InOperation,
}

impl DeviceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::InOperation => "in_operation",
        }
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceStatus {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(Self::Available),
            "in_operation" => Ok(Self::InOperation),
            other => Err(StoreError::new(format!("unknown device status '{other}'"))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationStatus {
    Released,
    Finished,
}

impl OperationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Released => "released",
            Self::Finished => "finished",
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationStatus {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "released" => Ok(Self::Released),
            "finished" => Ok(Self::Finished),
            other => Err(StoreError::new(format!(
                "unknown operation status '{other}'"
            ))),
        }
    }
}

/// A user's role. Anything other than `supervisor` is kept verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Supervisor,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Supervisor => SUPERVISOR_ROLE,
            Self::Other(name) => name,
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        if value == SUPERVISOR_ROLE {
            Self::Supervisor
        } else {
            Self::Other(value)
        }
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<Role> for String {
    fn from(value: Role) -> Self {
        value.as_str().to_string()
    }
}

/// Full row from the `users` table.
#[derive(Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub badge_number: String,
    pub password: String,
    pub role: Role,
}

impl User {
    pub fn is_supervisor(&self) -> bool {
        self.role == Role::Supervisor
    }

    /// Project into the identity blob kept in the session.
    pub fn to_session(&self) -> SessionUser {
        SessionUser {
            id: self.id,
            name: self.name.clone(),
            role: self.role.clone(),
        }
    }

    pub fn to_collaborator(&self) -> Collaborator {
        Collaborator {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

// Hand-written so the password never ends up in logs.
impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("badge_number", &self.badge_number)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

/// Identity persisted for the browser session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: i64,
    pub name: String,
    pub role: Role,
}

impl SessionUser {
    pub fn is_supervisor(&self) -> bool {
        self.role == Role::Supervisor
    }
}

/// A user as shown in the release and return modals.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collaborator {
    pub id: i64,
    pub name: String,
}

/// Row from the `devices` table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub id: i64,
    pub device_number: String,
    pub status: DeviceStatus,
}

impl Device {
    pub fn is_available(&self) -> bool {
        self.status == DeviceStatus::Available
    }
}

/// Row from the `operations` table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    pub id: i64,
    pub device_id: i64,
    pub collaborator_id: i64,
    pub status: OperationStatus,
    pub operation_date: DateTime<Utc>,
}

impl Operation {
    pub fn is_open(&self) -> bool {
        self.status == OperationStatus::Released
    }
}

/// Report row: an operation with the collaborator's name expanded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationRecord {
    pub id: i64,
    pub device_id: i64,
    pub device_number: Option<String>,
    pub collaborator_name: Option<String>,
    pub status: OperationStatus,
    pub operation_date: DateTime<Utc>,
}

impl OperationRecord {
    /// Collaborator name, falling back to [`UNKNOWN_COLLABORATOR`].
    pub fn collaborator_display(&self) -> &str {
        self.collaborator_name
            .as_deref()
            .unwrap_or(UNKNOWN_COLLABORATOR)
    }

    /// Device number when known, otherwise the raw device id.
    pub fn device_display(&self) -> String {
        match &self.device_number {
            Some(number) => number.clone(),
            None => self.device_id.to_string(),
        }
    }

    /// `operation_date` as the report shows and filters it,
    /// e.g. `2024-01-15T10:20:30+00:00`.
    pub fn date_string(&self) -> String {
        self.operation_date
            .to_rfc3339_opts(SecondsFormat::Secs, false)
    }
}

/// What the return modal shows before the user confirms.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnPreview {
    pub device: Device,
    pub operation: Operation,
    pub collaborator: Collaborator,
}

/// Dashboard counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indicators {
    pub available: usize,
    pub in_operation: usize,
}

impl Indicators {
    pub fn count(devices: &[Device]) -> Self {
        devices.iter().fold(Self::default(), |mut acc, device| {
            match device.status {
                DeviceStatus::Available => acc.available += 1,
                DeviceStatus::InOperation => acc.in_operation += 1,
            }
            acc
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_status_wire_names() {
        assert_eq!("in_operation".parse::<DeviceStatus>().unwrap(), DeviceStatus::InOperation);
        assert_eq!(DeviceStatus::Available.to_string(), "available");
        assert_eq!("finished".parse::<OperationStatus>().unwrap(), OperationStatus::Finished);
        assert!("disponivel".parse::<DeviceStatus>().is_err());
        assert!("".parse::<OperationStatus>().is_err());
    }

    #[test]
    fn test_role_keeps_unknown_names() {
        assert_eq!(Role::from("supervisor"), Role::Supervisor);
        assert_eq!(Role::from("operator"), Role::Other("operator".to_string()));
        assert_eq!(String::from(Role::Other("operator".to_string())), "operator");
    }

    #[test]
    fn test_user_debug_hides_password() {
        let user = User {
            id: 1,
            name: "Ana".to_string(),
            badge_number: "1234".to_string(),
            password: "hunter2".to_string(),
            role: Role::Supervisor,
        };
        let rendered = format!("{user:?}");
        assert!(rendered.contains("Ana"));
        assert!(!rendered.contains("hunter2"));
        assert!(user.to_session().is_supervisor());
    }

    #[test]
    fn test_record_display_fallbacks() {
        let record = OperationRecord {
            id: 7,
            device_id: 3,
            device_number: None,
            collaborator_name: None,
            status: OperationStatus::Released,
            operation_date: Utc.with_ymd_and_hms(2024, 1, 15, 10, 20, 30).unwrap(),
        };
        assert_eq!(record.collaborator_display(), "Unknown");
        assert_eq!(record.device_display(), "3");
        assert_eq!(record.date_string(), "2024-01-15T10:20:30+00:00");
    }

    #[test]
    fn test_indicators_count() {
        let devices = vec![
            Device { id: 1, device_number: "C-01".into(), status: DeviceStatus::Available },
            Device { id: 2, device_number: "C-02".into(), status: DeviceStatus::InOperation },
            Device { id: 3, device_number: "C-03".into(), status: DeviceStatus::Available },
        ];
        assert_eq!(
            Indicators::count(&devices),
            Indicators { available: 2, in_operation: 1 }
        );
    }
}

//! # API crate: fullstack server functions for the CollectWise dashboard
//!
//! Defines every Dioxus server function the web frontend calls, plus the
//! server-side modules they rely on.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`auth`] | (none) | Session identity (`"user"` key) and the supervisor guard |
//! | [`config`] | `server` | Loads `collectwise.toml` once per process |
//! | [`db`] | (none) | PostgreSQL pool (lazy `OnceCell` singleton) and [`db::PgStore`] |
//! | [`models`] | (none) | `sqlx::FromRow` rows and their conversion into `store` records |
//!
//! ## Server functions exposed here
//!
//! Each public `async fn` is a Dioxus server function compiled twice: with the
//! full server logic behind `#[cfg(feature = "server")]`, and as a thin client
//! stub that forwards the call over HTTP.
//!
//! - **Session**: `get_session_user`, `login`, `logout`
//! - **Dashboard**: `get_dashboard_config`, `get_indicators`
//! - **Release**: `lookup_collaborator`, `release_device`
//! - **Return**: `preview_return`, `return_device`
//! - **Override**: `list_open_devices`, `force_available`, `force_all_available`
//! - **Report**: `list_operations`
//!
//! Everything except the session functions and the config requires a
//! supervisor session.

use dioxus::prelude::*;

pub mod auth;
#[cfg(feature = "server")]
pub mod config;
pub mod db;
pub mod models;

pub use store::{
    Collaborator, DashboardConfig, Device, Indicators, Operation, OperationRecord, ReturnPreview,
    SessionUser,
};

/// Lifecycle controller over the shared PostgreSQL pool.
#[cfg(feature = "server")]
async fn lifecycle() -> Result<store::Lifecycle<db::PgStore>, ServerFnError> {
    let store = db::PgStore::connect()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    Ok(store::Lifecycle::new(store))
}

/// Get the identity persisted in the current session.
#[cfg(feature = "server")]
#[get("/api/session", session: tower_sessions::Session)]
pub async fn get_session_user() -> Result<Option<SessionUser>, ServerFnError> {
    auth::current_user(&session).await
}

#[cfg(not(feature = "server"))]
#[get("/api/session")]
pub async fn get_session_user() -> Result<Option<SessionUser>, ServerFnError> {
    Ok(None)
}

/// Log in with badge number and password. Supervisors only.
#[cfg(feature = "server")]
#[post("/api/auth/login", session: tower_sessions::Session)]
pub async fn login(badge_number: String, password: String) -> Result<SessionUser, ServerFnError> {
    let user = lifecycle()
        .await?
        .authenticate(&badge_number, &password)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    auth::store_user(&session, &user).await?;

    Ok(user)
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/login")]
pub async fn login(badge_number: String, password: String) -> Result<SessionUser, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Log out the current user by clearing the session.
#[cfg(feature = "server")]
#[post("/api/auth/logout", session: tower_sessions::Session)]
pub async fn logout() -> Result<(), ServerFnError> {
    auth::clear_session(&session).await
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/logout")]
pub async fn logout() -> Result<(), ServerFnError> {
    Ok(())
}

/// Page sizes and other display settings.
#[cfg(feature = "server")]
#[get("/api/config")]
pub async fn get_dashboard_config() -> Result<DashboardConfig, ServerFnError> {
    config::get_config()
        .await
        .cloned()
        .map_err(|e| ServerFnError::new(e.to_string()))
}

#[cfg(not(feature = "server"))]
#[get("/api/config")]
pub async fn get_dashboard_config() -> Result<DashboardConfig, ServerFnError> {
    Ok(DashboardConfig::default())
}

/// Count available and in-operation devices.
#[cfg(feature = "server")]
#[get("/api/indicators", session: tower_sessions::Session)]
pub async fn get_indicators() -> Result<Indicators, ServerFnError> {
    auth::require_supervisor(&session).await?;

    lifecycle()
        .await?
        .indicators()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

#[cfg(not(feature = "server"))]
#[get("/api/indicators")]
pub async fn get_indicators() -> Result<Indicators, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Find the collaborator a badge number belongs to.
#[cfg(feature = "server")]
#[post("/api/collaborators/lookup", session: tower_sessions::Session)]
pub async fn lookup_collaborator(badge_number: String) -> Result<Collaborator, ServerFnError> {
    auth::require_supervisor(&session).await?;

    lifecycle()
        .await?
        .lookup_collaborator(&badge_number)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

#[cfg(not(feature = "server"))]
#[post("/api/collaborators/lookup")]
pub async fn lookup_collaborator(badge_number: String) -> Result<Collaborator, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Check a device out to a collaborator.
#[cfg(feature = "server")]
#[post("/api/devices/release", session: tower_sessions::Session)]
pub async fn release_device(
    badge_number: String,
    device_number: String,
) -> Result<Operation, ServerFnError> {
    let supervisor = auth::require_supervisor(&session).await?;
    tracing::debug!(supervisor_id = supervisor.id, %device_number, "release requested");

    lifecycle()
        .await?
        .release(&badge_number, &device_number)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

#[cfg(not(feature = "server"))]
#[post("/api/devices/release")]
pub async fn release_device(
    badge_number: String,
    device_number: String,
) -> Result<Operation, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Show who holds a device before returning it.
#[cfg(feature = "server")]
#[post("/api/devices/return/preview", session: tower_sessions::Session)]
pub async fn preview_return(device_number: String) -> Result<ReturnPreview, ServerFnError> {
    auth::require_supervisor(&session).await?;

    lifecycle()
        .await?
        .preview_return(&device_number)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

#[cfg(not(feature = "server"))]
#[post("/api/devices/return/preview")]
pub async fn preview_return(device_number: String) -> Result<ReturnPreview, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Return a device and close its operation.
#[cfg(feature = "server")]
#[post("/api/devices/return", session: tower_sessions::Session)]
pub async fn return_device(device_number: String) -> Result<ReturnPreview, ServerFnError> {
    let supervisor = auth::require_supervisor(&session).await?;
    tracing::debug!(supervisor_id = supervisor.id, %device_number, "return requested");

    lifecycle()
        .await?
        .return_device(&device_number)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

#[cfg(not(feature = "server"))]
#[post("/api/devices/return")]
pub async fn return_device(device_number: String) -> Result<ReturnPreview, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Devices currently in operation.
#[cfg(feature = "server")]
#[get("/api/devices/open", session: tower_sessions::Session)]
pub async fn list_open_devices() -> Result<Vec<Device>, ServerFnError> {
    auth::require_supervisor(&session).await?;

    lifecycle()
        .await?
        .list_open_devices()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

#[cfg(not(feature = "server"))]
#[get("/api/devices/open")]
pub async fn list_open_devices() -> Result<Vec<Device>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Force one device back to available without touching its operations.
/// Returns `false` when it already was.
#[cfg(feature = "server")]
#[post("/api/devices/force-available", session: tower_sessions::Session)]
pub async fn force_available(device_id: i64) -> Result<bool, ServerFnError> {
    let supervisor = auth::require_supervisor(&session).await?;
    tracing::info!(supervisor_id = supervisor.id, device_id, "override requested");

    lifecycle()
        .await?
        .force_available(device_id)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

#[cfg(not(feature = "server"))]
#[post("/api/devices/force-available")]
pub async fn force_available(device_id: i64) -> Result<bool, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Force every in-operation device back to available.
#[cfg(feature = "server")]
#[post("/api/devices/force-available/all", session: tower_sessions::Session)]
pub async fn force_all_available() -> Result<usize, ServerFnError> {
    let supervisor = auth::require_supervisor(&session).await?;
    tracing::info!(supervisor_id = supervisor.id, "bulk override requested");

    lifecycle()
        .await?
        .force_all_available()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

#[cfg(not(feature = "server"))]
#[post("/api/devices/force-available/all")]
pub async fn force_all_available() -> Result<usize, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Every operation with its collaborator's name, for the report.
#[cfg(feature = "server")]
#[get("/api/operations", session: tower_sessions::Session)]
pub async fn list_operations() -> Result<Vec<OperationRecord>, ServerFnError> {
    auth::require_supervisor(&session).await?;

    lifecycle()
        .await?
        .operation_records()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

#[cfg(not(feature = "server"))]
#[get("/api/operations")]
pub async fn list_operations() -> Result<Vec<OperationRecord>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

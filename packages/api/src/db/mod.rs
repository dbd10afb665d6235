//! # Database module: PostgreSQL pool and the `RemoteStore` backend
//!
//! Entirely gated behind `#[cfg(feature = "server")]` so that client (WASM)
//! builds never pull in SQLx or Tokio networking code.
//!
//! - [`get_pool`]: lazy, process-wide [`sqlx::PgPool`] singleton backed by a
//!   [`tokio::sync::OnceCell`]. The first call reads `DATABASE_URL` (via
//!   `dotenvy`) and opens up to 5 connections.
//! - [`PgStore`]: [`store::RemoteStore`] over that pool. Release and return
//!   commits each run inside one transaction.

#[cfg(feature = "server")]
mod pg_store;
#[cfg(feature = "server")]
mod pool;

#[cfg(feature = "server")]
pub use pg_store::PgStore;
#[cfg(feature = "server")]
pub use pool::get_pool;

//! # User row
//!
//! [`UserRow`] is the full record from the `users` table, loaded with
//! [`sqlx::FromRow`]. It converts into [`store::User`], which in turn projects
//! into the client-safe [`store::SessionUser`] (no password).

use sqlx::FromRow;

/// Full user record from the database.
#[derive(Clone, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub name: String,
    pub badge_number: String,
    pub password: String,
    pub role: String,
}

impl From<UserRow> for store::User {
    fn from(row: UserRow) -> Self {
        store::User {
            id: row.id,
            name: row.name,
            badge_number: row.badge_number,
            password: row.password,
            role: store::Role::from(row.role),
        }
    }
}

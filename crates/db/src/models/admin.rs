//! Admin account model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use watchstore_core::types::{DbId, Timestamp};

/// An admin row from the `admins` table. The hash is never serialized.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    pub id: DbId,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub created_at: Timestamp,
}

/// DTO for inserting an admin. The caller hashes the password.
#[derive(Debug, Clone)]
pub struct CreateAdmin {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    /// Defaults to `admin` if omitted.
    pub role: Option<String>,
}

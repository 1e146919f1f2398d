//! Repository for the `admins` table.

use chrono::Utc;
use watchstore_core::types::DbId;

use crate::models::admin::{Admin, CreateAdmin};
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, password_hash, role, created_at";

/// Provides lookups for the auth gate and the startup bootstrap.
pub struct AdminRepo;

impl AdminRepo {
    /// Insert a new admin, returning the created row.
    ///
    /// Fails with a unique violation on `uq_admins_email` if the email is taken.
    pub async fn create(pool: &DbPool, input: &CreateAdmin) -> Result<Admin, sqlx::Error> {
        let query = format!(
            "INSERT INTO admins (name, email, password_hash, role, created_at) \
             VALUES ($1, $2, $3, COALESCE($4, 'admin'), $5) \
             RETURNING {COLUMNS}"
        );
        let now = Utc::now();
        with_pool!(pool, p => {
            sqlx::query_as::<_, Admin>(&query)
                .bind(&input.name)
                .bind(&input.email)
                .bind(&input.password_hash)
                .bind(&input.role)
                .bind(now)
                .fetch_one(p)
                .await
        })
    }

    /// Find an admin by email, compared case-insensitively.
    pub async fn find_by_email(pool: &DbPool, email: &str) -> Result<Option<Admin>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM admins WHERE LOWER(email) = LOWER($1)");
        with_pool!(pool, p => {
            sqlx::query_as::<_, Admin>(&query)
                .bind(email)
                .fetch_optional(p)
                .await
        })
    }

    /// Find an admin by internal ID.
    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<Admin>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM admins WHERE id = $1");
        with_pool!(pool, p => {
            sqlx::query_as::<_, Admin>(&query)
                .bind(id)
                .fetch_optional(p)
                .await
        })
    }

    pub async fn count(pool: &DbPool) -> Result<i64, sqlx::Error> {
        with_pool!(pool, p => {
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM admins")
                .fetch_one(p)
                .await
        })
    }
}

//! Well-known role name constants.
//!
//! These must match the column default in the `admins` table migrations.

pub const ROLE_ADMIN: &str = "admin";

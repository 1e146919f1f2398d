//! Request extractors that gate admin-only handlers.
//!
//! - [`auth::AuthAdmin`] -- Requires a valid bearer token with the `admin` role.

pub mod auth;

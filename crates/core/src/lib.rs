//! Database-free domain logic for the watch storefront.
//!
//! Everything here is pure: the `db` crate feeds rows in and the `api`
//! crate turns results into HTTP responses.

pub mod analytics;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod locale;
pub mod order_status;
pub mod roles;
pub mod types;

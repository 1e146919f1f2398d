//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&DbPool` as the first argument.

pub mod admin_repo;
pub mod analytics_repo;
pub mod order_repo;
pub mod product_repo;

pub use admin_repo::AdminRepo;
pub use analytics_repo::AnalyticsRepo;
pub use order_repo::OrderRepo;
pub use product_repo::ProductRepo;

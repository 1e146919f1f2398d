//! Row models and write DTOs, one module per table family.

pub mod admin;
pub mod order;
pub mod product;

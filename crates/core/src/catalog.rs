//! Catalog field rules and storefront filters.

use serde::Deserialize;

use crate::error::CoreError;
use crate::locale::is_all_categories;

/// Ordering applied to the public product listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductSort {
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
    Rating,
}

/// Query parameters of `GET /products`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFilter {
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    #[serde(default)]
    pub sort: ProductSort,
}

impl ProductFilter {
    /// The category to filter on, or `None` for the sentinel / blank value.
    pub fn category(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty() && !is_all_categories(c))
    }
}

/// Fields that carry a rule, borrowed from a create or update payload.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductFields<'a> {
    pub name: Option<&'a str>,
    pub description: Option<&'a str>,
    pub category: Option<&'a str>,
    pub price: Option<f64>,
}

/// A new product needs a name, description, category and a non-negative price.
///
/// `old_price` is deliberately left unchecked.
pub fn validate_new_product(fields: ProductFields<'_>) -> Result<(), CoreError> {
    let required = [
        ("name", fields.name),
        ("description", fields.description),
        ("category", fields.category),
    ];
    for (field, value) in required {
        if value.is_none() {
            return Err(CoreError::Validation(format!("{field} is required")));
        }
    }
    if fields.price.is_none() {
        return Err(CoreError::Validation("price is required".into()));
    }
    validate_product_update(fields)
}

/// Only the supplied fields are checked; absent fields stay as stored.
pub fn validate_product_update(fields: ProductFields<'_>) -> Result<(), CoreError> {
    let text = [
        ("name", fields.name),
        ("description", fields.description),
        ("category", fields.category),
    ];
    for (field, value) in text {
        if value.is_some_and(|v| v.trim().is_empty()) {
            return Err(CoreError::Validation(format!("{field} must not be blank")));
        }
    }
    if let Some(price) = fields.price {
        if !price.is_finite() || price < 0.0 {
            return Err(CoreError::Validation(
                "price must be a non-negative number".into(),
            ));
        }
    }
    Ok(())
}

//! Product entity model and DTOs.

use serde::{Deserialize, Deserializer, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use watchstore_core::catalog::ProductFields;
use watchstore_core::types::{DbId, Timestamp};

/// A product row from the `products` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: DbId,
    pub name: String,
    /// Secondary-language display name.
    pub name_en: Option<String>,
    pub brand: Option<String>,
    pub category: String,
    pub price: f64,
    /// Pre-discount reference price, shown struck through. Not validated against `price`.
    pub old_price: Option<f64>,
    pub description: Option<String>,
    pub features: Json<Vec<String>>,
    /// Image URIs; the first one is the primary image.
    pub images: Json<Vec<String>>,
    pub in_stock: bool,
    pub featured: bool,
    pub rating: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Product {
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// DTO for creating a product.
///
/// Required fields are optional here so that a missing field surfaces as a
/// validation error rather than a body rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    pub name: Option<String>,
    pub name_en: Option<String>,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub old_price: Option<f64>,
    pub description: Option<String>,
    pub features: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    /// Defaults to `true`.
    pub in_stock: Option<bool>,
    /// Defaults to `false`.
    pub featured: Option<bool>,
    /// Defaults to `0`.
    pub rating: Option<f64>,
}

impl CreateProduct {
    pub fn fields(&self) -> ProductFields<'_> {
        ProductFields {
            name: self.name.as_deref(),
            description: self.description.as_deref(),
            category: self.category.as_deref(),
            price: self.price,
        }
    }
}

/// DTO for updating a product. Absent fields keep their stored value.
///
/// `name_en`, `brand` and `old_price` distinguish an absent key (`None`)
/// from an explicit `null` (`Some(None)`), which clears the column.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub name_en: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub brand: Option<Option<String>>,
    pub category: Option<String>,
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "present")]
    pub old_price: Option<Option<f64>>,
    pub description: Option<String>,
    pub features: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub in_stock: Option<bool>,
    pub featured: Option<bool>,
    pub rating: Option<f64>,
}

/// Marks a key as present, keeping `null` as `Some(None)`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl UpdateProduct {
    pub fn fields(&self) -> ProductFields<'_> {
        ProductFields {
            name: self.name.as_deref(),
            description: self.description.as_deref(),
            category: self.category.as_deref(),
            price: self.price,
        }
    }
}

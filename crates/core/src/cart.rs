//! Browsing-session cart as a pure reducer.
//!
//! A [`Cart`] is an immutable snapshot: every operation returns a new cart
//! and leaves the receiver untouched. It is persisted only at the boundary
//! (a JSON string in client storage) and becomes a list of
//! [`LineEntry`] values at checkout.

use serde::{Deserialize, Serialize};

use crate::checkout::LineEntry;
use crate::types::DbId;

/// The catalog facts a cart needs about a product.
#[derive(Debug, Clone, PartialEq)]
pub struct CartProduct {
    pub id: DbId,
    pub name: String,
    pub price: f64,
    /// Primary image, if any.
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: DbId,
    pub name: String,
    pub price: f64,
    pub image: Option<String>,
    pub quantity: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add one unit of `product`, merging with an existing line.
    pub fn add(&self, product: &CartProduct) -> Cart {
        let mut items = self.items.clone();
        match items.iter_mut().find(|i| i.product_id == product.id) {
            Some(item) => item.quantity += 1,
            None => items.push(CartItem {
                product_id: product.id,
                name: product.name.clone(),
                price: product.price,
                image: product.image.clone(),
                quantity: 1,
            }),
        }
        Cart { items }
    }

    pub fn remove(&self, product_id: DbId) -> Cart {
        Cart {
            items: self
                .items
                .iter()
                .filter(|i| i.product_id != product_id)
                .cloned()
                .collect(),
        }
    }

    /// Set the quantity of a line; zero or less removes it.
    pub fn set_quantity(&self, product_id: DbId, quantity: i32) -> Cart {
        if quantity <= 0 {
            return self.remove(product_id);
        }
        Cart {
            items: self
                .items
                .iter()
                .map(|i| {
                    if i.product_id == product_id {
                        CartItem {
                            quantity,
                            ..i.clone()
                        }
                    } else {
                        i.clone()
                    }
                })
                .collect(),
        }
    }

    pub fn clear(&self) -> Cart {
        Cart::new()
    }

    pub fn total(&self) -> f64 {
        self.items
            .iter()
            .map(|i| i.price * f64::from(i.quantity))
            .sum()
    }

    /// Number of units across all lines.
    pub fn count(&self) -> i64 {
        self.items.iter().map(|i| i64::from(i.quantity)).sum()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Restore a persisted cart. Unreadable input yields an empty cart.
    pub fn from_json(raw: &str) -> Cart {
        serde_json::from_str(raw).unwrap_or_default()
    }

    /// Line entries for a checkout submission.
    pub fn to_line_entries(&self) -> Vec<LineEntry> {
        self.items
            .iter()
            .map(|i| LineEntry {
                product_id: Some(i.product_id),
                name: Some(i.name.clone()),
                price: i.price,
                quantity: i.quantity,
                image: i.image.clone(),
            })
            .collect()
    }
}

//! Order header / line item models and the checkout write DTO.

use serde::Serialize;
use sqlx::FromRow;
use watchstore_core::checkout::{compute_total, CheckoutRequest};
use watchstore_core::order_status::OrderStatus;
use watchstore_core::types::{DbId, Timestamp};

/// An order header row from the `orders` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: DbId,
    pub customer: String,
    pub phone: String,
    pub email: Option<String>,
    pub city: String,
    pub address: String,
    pub notes: Option<String>,
    /// Computed server-side at checkout.
    pub total: f64,
    #[sqlx(try_from = "String")]
    pub status: OrderStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A line item row from the `order_items` table.
///
/// `name`, `price` and `image` are copies taken at checkout; they never
/// follow later catalog edits. `product_id` is a plain id with no foreign key.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: DbId,
    pub order_id: DbId,
    pub product_id: Option<DbId>,
    pub name: String,
    pub price: f64,
    pub image: Option<String>,
    pub quantity: i32,
}

/// An order together with its line items.
#[derive(Debug, Clone, Serialize)]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// Everything written by one checkout.
#[derive(Debug, Clone)]
pub struct CreateOrder {
    pub customer: String,
    pub phone: String,
    pub email: Option<String>,
    pub city: String,
    pub address: String,
    pub notes: Option<String>,
    pub total: f64,
    pub placed_at: Timestamp,
    pub items: Vec<CreateOrderItem>,
}

#[derive(Debug, Clone)]
pub struct CreateOrderItem {
    pub product_id: Option<DbId>,
    pub name: String,
    pub price: f64,
    pub image: Option<String>,
    pub quantity: i32,
}

impl CreateOrder {
    /// Build the write from an already validated checkout request.
    ///
    /// The total is recomputed from the line entries.
    pub fn from_checkout(request: &CheckoutRequest, placed_at: Timestamp) -> Self {
        let items = request
            .items
            .iter()
            .map(|entry| CreateOrderItem {
                product_id: entry.product_id,
                name: entry.name.clone().unwrap_or_default(),
                price: entry.price,
                image: entry.image.clone().filter(|i| !i.is_empty()),
                quantity: entry.quantity,
            })
            .collect();

        Self {
            customer: request.customer.clone().unwrap_or_default(),
            phone: request.phone.clone().unwrap_or_default(),
            email: request.email.clone().filter(|e| !e.trim().is_empty()),
            city: request.city.clone().unwrap_or_default(),
            address: request.address.clone().unwrap_or_default(),
            notes: request.notes.clone().filter(|n| !n.trim().is_empty()),
            total: compute_total(&request.items),
            placed_at,
            items,
        }
    }
}

//! Checkout submission: validation and server-side total.
//!
//! The caller's idea of the total is never read; any `total` key in the
//! request body is ignored during deserialization.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::types::DbId;

/// Customer and delivery details plus the cart snapshot.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    #[validate(required(message = "is required"), length(min = 1, message = "must not be empty"))]
    pub customer: Option<String>,
    #[validate(required(message = "is required"), length(min = 1, message = "must not be empty"))]
    pub phone: Option<String>,
    pub email: Option<String>,
    #[validate(required(message = "is required"), length(min = 1, message = "must not be empty"))]
    pub city: Option<String>,
    #[validate(required(message = "is required"), length(min = 1, message = "must not be empty"))]
    pub address: Option<String>,
    pub notes: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, message = "must contain at least one item"), nested)]
    pub items: Vec<LineEntry>,
}

/// One product-quantity pairing as it sat in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LineEntry {
    #[serde(default)]
    pub product_id: Option<DbId>,
    #[validate(required(message = "is required"), length(min = 1, message = "must not be empty"))]
    pub name: Option<String>,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub price: f64,
    #[serde(default = "default_quantity")]
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub quantity: i32,
    #[serde(default)]
    pub image: Option<String>,
}

fn default_quantity() -> i32 {
    1
}

/// Reject the submission before anything is written.
pub fn validate_checkout(request: &CheckoutRequest) -> Result<(), CoreError> {
    request.validate()?;

    let required = [
        ("customer", &request.customer),
        ("phone", &request.phone),
        ("city", &request.city),
        ("address", &request.address),
    ];
    for (field, value) in required {
        if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
            return Err(CoreError::Validation(format!("{field} must not be blank")));
        }
    }
    if request
        .items
        .iter()
        .any(|item| item.name.as_deref().is_some_and(|n| n.trim().is_empty()))
    {
        return Err(CoreError::Validation("item name must not be blank".into()));
    }
    if request.items.iter().any(|item| !item.price.is_finite()) {
        return Err(CoreError::Validation("item price must be a finite number".into()));
    }
    Ok(())
}

/// `Σ price × quantity` over the submitted entries.
pub fn compute_total(items: &[LineEntry]) -> f64 {
    items
        .iter()
        .map(|item| item.price * f64::from(item.quantity))
        .sum()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn entry(name: &str, price: f64, quantity: i32) -> LineEntry {
        LineEntry {
            product_id: None,
            name: Some(name.to_string()),
            price,
            quantity,
            image: None,
        }
    }

    fn valid_request() -> CheckoutRequest {
        CheckoutRequest {
            customer: Some("Mohamed Ahmed".into()),
            phone: Some("+222 36 12 34 56".into()),
            email: None,
            city: Some("Nouakchott".into()),
            address: Some("Tevragh Zeina".into()),
            notes: None,
            items: vec![entry("Rolex Datejust", 100.0, 2), entry("Casio G-Shock", 50.0, 1)],
        }
    }

    #[test]
    fn total_is_sum_of_price_times_quantity() {
        let request = valid_request();
        assert_eq!(compute_total(&request.items), 250.0);
    }

    #[test]
    fn total_of_no_items_is_zero() {
        assert_eq!(compute_total(&[]), 0.0);
    }

    #[test]
    fn valid_request_passes() {
        assert!(validate_checkout(&valid_request()).is_ok());
    }

    #[test]
    fn missing_required_fields_fail() {
        let mut request = valid_request();
        request.customer = None;
        assert_matches!(validate_checkout(&request), Err(CoreError::Validation(msg)) if msg.contains("customer"));

        let mut request = valid_request();
        request.address = Some("   ".into());
        assert_matches!(validate_checkout(&request), Err(CoreError::Validation(msg)) if msg.contains("address"));

        let mut request = valid_request();
        request.phone = Some(String::new());
        assert_matches!(validate_checkout(&request), Err(CoreError::Validation(_)));
    }

    #[test]
    fn empty_items_fail() {
        let mut request = valid_request();
        request.items.clear();
        assert_matches!(validate_checkout(&request), Err(CoreError::Validation(msg)) if msg.contains("items"));
    }

    #[test]
    fn bad_line_entries_fail() {
        let mut request = valid_request();
        request.items[0].quantity = 0;
        assert_matches!(validate_checkout(&request), Err(CoreError::Validation(_)));

        let mut request = valid_request();
        request.items[1].price = -1.0;
        assert_matches!(validate_checkout(&request), Err(CoreError::Validation(_)));
    }

    #[test]
    fn client_total_is_ignored_and_quantity_defaults() {
        let request: CheckoutRequest = serde_json::from_value(serde_json::json!({
            "customer": "A",
            "phone": "1",
            "city": "C",
            "address": "D",
            "total": 1,
            "items": [{ "name": "Omega", "price": 280.0 }]
        }))
        .unwrap();
        assert_eq!(request.items[0].quantity, 1);
        assert_eq!(compute_total(&request.items), 280.0);
    }
}

pub mod auth;
pub mod health;
pub mod orders;
pub mod products;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                  login (public)
/// /auth/me                     current admin (admin)
///
/// /products                    list (public), create (admin)
/// /products/featured           featured list (public)
/// /products/categories         category labels (public)
/// /products/{id}               get (public), update, delete (admin)
///
/// /orders                      place (public), list (admin)
/// /orders/stats                dashboard numbers (admin)
/// /orders/analytics            chart series (admin)
/// /orders/{id}                 delete (admin)
/// /orders/{id}/status          update status (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/products", products::router())
        .nest("/orders", orders::router())
}

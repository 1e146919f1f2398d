//! Handlers for the `/orders` resource.
//!
//! Placing an order is public; everything else is admin-only.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use watchstore_core::checkout::{validate_checkout, CheckoutRequest};
use watchstore_core::error::CoreError;
use watchstore_core::order_status::OrderStatus;
use watchstore_core::types::DbId;
use watchstore_db::models::order::CreateOrder;
use watchstore_db::repositories::{AnalyticsRepo, OrderRepo};

use crate::error::{AppError, AppJson, AppPath, AppResult};
use crate::handlers::products::MessageResponse;
use crate::middleware::auth::AuthAdmin;
use crate::state::AppState;

/// Request body for `PUT /orders/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Order", id })
}

/// POST /api/orders
///
/// Validates the checkout, recomputes the total and writes the order and
/// its items in one transaction. Any persistence failure is reported with a
/// fixed message.
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CheckoutRequest>,
) -> AppResult<impl IntoResponse> {
    validate_checkout(&input)?;

    let order = CreateOrder::from_checkout(&input, Utc::now());
    let created = OrderRepo::create(&state.pool, &order)
        .await
        .map_err(AppError::OrderWriteFailed)?;

    tracing::info!(
        order_id = created.order.id,
        items = created.items.len(),
        total = created.order.total,
        "Order placed",
    );
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/orders
pub async fn list(_admin: AuthAdmin, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let orders = OrderRepo::list(&state.pool).await?;
    Ok(Json(orders))
}

/// PUT /api/orders/{id}/status
///
/// Any status may follow any other; concurrent updates are last-write-wins.
pub async fn update_status(
    admin: AuthAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateStatusRequest>,
) -> AppResult<impl IntoResponse> {
    let status: OrderStatus = input
        .status
        .as_deref()
        .ok_or_else(|| CoreError::Validation("status is required".into()))?
        .parse()?;

    let order = OrderRepo::update_status(&state.pool, id, status)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(order_id = id, admin_id = admin.admin_id, %status, "Order status updated");
    Ok(Json(order))
}

/// DELETE /api/orders/{id}
pub async fn delete(
    admin: AuthAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    if !OrderRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(order_id = id, admin_id = admin.admin_id, "Order deleted");
    Ok(Json(MessageResponse {
        message: "Order deleted".to_string(),
    }))
}

/// GET /api/orders/stats
pub async fn stats(_admin: AuthAdmin, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let stats = AnalyticsRepo::dashboard_stats(&state.pool).await?;
    Ok(Json(stats))
}

/// GET /api/orders/analytics
pub async fn analytics(
    _admin: AuthAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let report = AnalyticsRepo::report(&state.pool, state.config.locale, Utc::now()).await?;
    Ok(Json(report))
}

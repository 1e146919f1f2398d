//! Handlers for the `/products` resource.
//!
//! Reads are public; create, update and delete require an admin token.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use watchstore_core::catalog::{validate_new_product, validate_product_update, ProductFilter};
use watchstore_core::error::CoreError;
use watchstore_core::types::DbId;
use watchstore_db::models::product::{CreateProduct, UpdateProduct};
use watchstore_db::repositories::ProductRepo;

use crate::error::{AppError, AppJson, AppPath, AppQuery, AppResult};
use crate::middleware::auth::AuthAdmin;
use crate::state::AppState;

/// Body of a successful delete.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Product",
        id,
    })
}

/// GET /api/products?category=&minPrice=&maxPrice=&sort=
pub async fn list(
    State(state): State<AppState>,
    AppQuery(filter): AppQuery<ProductFilter>,
) -> AppResult<impl IntoResponse> {
    let products = ProductRepo::list(&state.pool, &filter).await?;
    Ok(Json(products))
}

/// GET /api/products/featured
pub async fn list_featured(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let products = ProductRepo::list_featured(&state.pool).await?;
    Ok(Json(products))
}

/// GET /api/products/categories
///
/// Distinct categories, preceded by the "all categories" sentinel.
pub async fn list_categories(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let categories = ProductRepo::list_categories(&state.pool).await?;

    let mut labels = Vec::with_capacity(categories.len() + 1);
    labels.push(state.config.locale.all_categories_label().to_string());
    labels.extend(categories);
    Ok(Json(labels))
}

/// GET /api/products/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let product = ProductRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(product))
}

/// POST /api/products
pub async fn create(
    admin: AuthAdmin,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateProduct>,
) -> AppResult<impl IntoResponse> {
    validate_new_product(input.fields())?;

    let product = ProductRepo::create(&state.pool, &input).await?;
    tracing::info!(product_id = product.id, admin_id = admin.admin_id, "Product created");
    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /api/products/{id}
///
/// Absent fields keep their stored value.
pub async fn update(
    admin: AuthAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateProduct>,
) -> AppResult<impl IntoResponse> {
    validate_product_update(input.fields())?;

    let product = ProductRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(product_id = id, admin_id = admin.admin_id, "Product updated");
    Ok(Json(product))
}

/// DELETE /api/products/{id}
///
/// Past orders keep their copied item data.
pub async fn delete(
    admin: AuthAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    if !ProductRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(product_id = id, admin_id = admin.admin_id, "Product deleted");
    Ok(Json(MessageResponse {
        message: "Product deleted".to_string(),
    }))
}

use axum::routing::{delete, get, put};
use axum::Router;

use crate::handlers::orders;
use crate::state::AppState;

/// Order routes mounted at `/orders`.
///
/// ```text
/// POST   /              -> create
/// GET    /              -> list (admin)
/// GET    /stats         -> stats (admin)
/// GET    /analytics     -> analytics (admin)
/// DELETE /{id}          -> delete (admin)
/// PUT    /{id}/status   -> update_status (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::list).post(orders::create))
        .route("/stats", get(orders::stats))
        .route("/analytics", get(orders::analytics))
        .route("/{id}", delete(orders::delete))
        .route("/{id}/status", put(orders::update_status))
}

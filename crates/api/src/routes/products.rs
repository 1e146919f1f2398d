use axum::routing::get;
use axum::Router;

use crate::handlers::products;
use crate::state::AppState;

/// Catalog routes mounted at `/products`.
///
/// ```text
/// GET    /              -> list
/// POST   /              -> create (admin)
/// GET    /featured      -> list_featured
/// GET    /categories    -> list_categories
/// GET    /{id}          -> get_by_id
/// PUT    /{id}          -> update (admin)
/// DELETE /{id}          -> delete (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(products::list).post(products::create))
        .route("/featured", get(products::list_featured))
        .route("/categories", get(products::list_categories))
        .route(
            "/{id}",
            get(products::get_by_id)
                .put(products::update)
                .delete(products::delete),
        )
}

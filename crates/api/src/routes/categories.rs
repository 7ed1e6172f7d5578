//! Route definitions for categories.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::categories;
use crate::state::AppState;

/// Category routes.
///
/// ```text
/// GET    /categories/        -> list_categories
/// POST   /categories/        -> create_category
/// PUT    /categories/{id}    -> update_category
/// DELETE /categories/{id}    -> delete_category
/// ```
pub fn router() -> Router<AppState> {
    let collection = get(categories::list_categories).post(categories::create_category);

    Router::new()
        .route("/categories", collection.clone())
        .route("/categories/", collection)
        .route(
            "/categories/{id}",
            put(categories::update_category).delete(categories::delete_category),
        )
}

//! Route definitions for QA items.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::qa;
use crate::state::AppState;

/// QA item routes.
///
/// ```text
/// GET    /qa/               -> list_qa_items
/// POST   /qa/submit_qa/     -> submit_qa_item
/// GET    /qa/{id}           -> get_qa_item
/// PUT    /qa/{id}           -> update_qa_item
/// DELETE /qa/{id}           -> delete_qa_item
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/qa", get(qa::list_qa_items))
        .route("/qa/", get(qa::list_qa_items))
        .route("/qa/submit_qa", post(qa::submit_qa_item))
        .route("/qa/submit_qa/", post(qa::submit_qa_item))
        .route(
            "/qa/{id}",
            get(qa::get_qa_item)
                .put(qa::update_qa_item)
                .delete(qa::delete_qa_item),
        )
}

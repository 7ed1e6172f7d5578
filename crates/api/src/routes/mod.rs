pub mod categories;
pub mod exports;
pub mod health;
pub mod qa;

use axum::Router;

use crate::state::AppState;

/// Build the resource route tree.
///
/// Route hierarchy:
///
/// ```text
/// /qa                      list
/// /qa/submit_qa            create
/// /qa/{id}                 get, update, delete
///
/// /categories              list, create
/// /categories/{id}         update, delete
///
/// /export/csv              CSV attachment
/// /export/json             JSON attachment
/// ```
///
/// Collection paths also answer with a trailing slash.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(qa::router())
        .merge(categories::router())
        .merge(exports::router())
}

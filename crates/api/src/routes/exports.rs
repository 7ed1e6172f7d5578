//! Route definitions for exports.

use axum::routing::get;
use axum::Router;

use crate::handlers::exports;
use crate::state::AppState;

/// ```text
/// GET /export/csv   -> export_csv
/// GET /export/json  -> export_json
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/export/csv", get(exports::export_csv))
        .route("/export/json", get(exports::export_json))
}

//! Handlers for full-table exports.
//!
//! Each export is rendered once, written to the export directory, and the
//! same content is returned as a file attachment.

use axum::extract::State;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use qabank_core::export::{build_export, write_export, ExportFormat};
use qabank_core::record::QaRecord;
use qabank_core::timestamp::now_in_display_zone;
use qabank_db::repositories::QaItemRepo;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /export/csv
pub async fn export_csv(State(state): State<AppState>) -> AppResult<Response> {
    export(&state, ExportFormat::Csv).await
}

/// GET /export/json
pub async fn export_json(State(state): State<AppState>) -> AppResult<Response> {
    export(&state, ExportFormat::Json).await
}

/// Snapshot every QA item, persist the rendering, and return it.
///
/// Responds 404 when there are no items to export.
async fn export(state: &AppState, format: ExportFormat) -> AppResult<Response> {
    let items = QaItemRepo::list(&state.pool).await?;
    let records: Vec<QaRecord> = items.iter().map(|i| i.to_record()).collect();

    let file = build_export(format, &records, &now_in_display_zone())?;
    let path = write_export(&state.config.export_dir, &file).await?;

    tracing::info!(
        format = format.extension(),
        rows = records.len(),
        path = %path.display(),
        "Export written",
    );

    Ok((
        StatusCode::OK,
        [
            (CONTENT_TYPE, format.content_type().to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename={}", file.filename),
            ),
        ],
        file.content,
    )
        .into_response())
}

//! Service health: database reachability plus the on-disk locations the
//! export endpoints and the backup scheduler write to.

use std::path::Path;

use axum::extract::State;
use axum::{routing::get, Json, Router};
use qabank_core::timestamp::today_in_display_zone;
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok` when the database answers and exports can be written, otherwise
    /// `degraded`.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    pub db_healthy: bool,
    /// The export directory exists (or could be created) and is writable.
    pub export_dir_ready: bool,
    /// The database file the scheduler copies is present.
    pub backup_source_present: bool,
    /// Today's backup file has already been written.
    pub backup_today: bool,
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = qabank_db::health_check(&state.pool).await.is_ok();
    let export_dir_ready = dir_ready(&state.config.export_dir).await;

    let backup = &state.config.backup;
    let backup_source_present = file_exists(&backup.source_path).await;
    let backup_today = file_exists(&backup.target_path(today_in_display_zone())).await;

    if !export_dir_ready {
        tracing::warn!(
            export_dir = %state.config.export_dir.display(),
            "Export directory is not writable"
        );
    }

    let status = if db_healthy && export_dir_ready {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        export_dir_ready,
        backup_source_present,
        backup_today,
    })
}

/// Exports create their directory on demand, so a missing directory is
/// created here as well.
async fn dir_ready(dir: &Path) -> bool {
    if tokio::fs::create_dir_all(dir).await.is_err() {
        return false;
    }
    match tokio::fs::metadata(dir).await {
        Ok(meta) => meta.is_dir() && !meta.permissions().readonly(),
        Err(_) => false,
    }
}

async fn file_exists(path: &Path) -> bool {
    tokio::fs::try_exists(path).await.unwrap_or(false)
}

/// Mount health check routes.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

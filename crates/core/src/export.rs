//! Full-table QA exports (CSV and JSON).
//!
//! Rendering is pure: callers hand over the already-formatted rows and get
//! back the file content plus the filename it is persisted and downloaded
//! under. [`write_export`] stores that content in the export directory.

use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset};

use crate::error::CoreError;
use crate::record::QaRecord;

/// Column names, fixed for compatibility with existing consumers.
pub const EXPORT_COLUMNS: [&str; 6] = [
    "id",
    "question",
    "answer",
    "category",
    "timestamp",
    "updated_timestamp",
];

/// Stem shared by every export filename.
pub const EXPORT_FILE_STEM: &str = "qa_export";

/// Supported export encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Json => "application/json",
        }
    }
}

/// A rendered export, ready to be persisted and returned to the caller.
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub format: ExportFormat,
    /// Persisted filename, also used as the suggested download name.
    pub filename: String,
    pub content: String,
}

/// `qa_export_<YYYYMMDD_HHMMSS>.<ext>` for the given export instant.
pub fn export_filename(format: ExportFormat, at: &DateTime<FixedOffset>) -> String {
    format!(
        "{EXPORT_FILE_STEM}_{}.{}",
        at.format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}

/// Render an export of `rows` stamped with `at`.
///
/// Fails with [`CoreError::EmptyExport`] when there is nothing to export.
pub fn build_export(
    format: ExportFormat,
    rows: &[QaRecord],
    at: &DateTime<FixedOffset>,
) -> Result<ExportFile, CoreError> {
    if rows.is_empty() {
        return Err(CoreError::EmptyExport);
    }

    let content = match format {
        ExportFormat::Csv => render_csv(rows),
        ExportFormat::Json => render_json(rows)?,
    };

    Ok(ExportFile {
        format,
        filename: export_filename(format, at),
        content,
    })
}

/// Header line plus one line per row, each terminated by `\n`.
///
/// Absent timestamps become empty fields.
pub fn render_csv(rows: &[QaRecord]) -> String {
    let mut out = String::new();
    out.push_str(&EXPORT_COLUMNS.join(","));
    out.push('\n');

    for row in rows {
        let fields = [
            row.id.to_string(),
            csv_escape(&row.question),
            csv_escape(&row.answer),
            csv_escape(&row.category),
            csv_escape(row.timestamp.as_deref().unwrap_or_default()),
            csv_escape(row.updated_timestamp.as_deref().unwrap_or_default()),
        ];
        out.push_str(&fields.join(","));
        out.push('\n');
    }

    out
}

/// Pretty-printed JSON array with 2-space indentation.
pub fn render_json(rows: &[QaRecord]) -> Result<String, CoreError> {
    serde_json::to_string_pretty(rows)
        .map_err(|e| CoreError::Internal(format!("JSON export serialization failed: {e}")))
}

/// Write `file` into `dir`, creating the directory if needed.
///
/// Returns the full path of the written file.
pub async fn write_export(dir: &Path, file: &ExportFile) -> std::io::Result<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(&file.filename);
    tokio::fs::write(&path, file.content.as_bytes()).await?;
    Ok(path)
}

fn csv_escape(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

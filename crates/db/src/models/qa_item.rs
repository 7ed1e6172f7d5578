//! QA item model and DTOs.

use qabank_core::record::QaRecord;
use qabank_core::timestamp::StoredInstant;
use qabank_core::types::DbId;
use serde::Deserialize;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};
use validator::Validate;

// ---------------------------------------------------------------------------
// Entity struct (database row)
// ---------------------------------------------------------------------------

/// A row from the `qa_items` table.
///
/// Timestamp columns are TEXT. Values written by this service carry a UTC
/// offset; zone-less values (imported or hand-edited rows) are wall-clock
/// time in the display zone and are kept naive.
#[derive(Debug, Clone, PartialEq)]
pub struct QaItem {
    pub id: DbId,
    pub question: String,
    pub answer: String,
    /// Name of the category this item was filed under.
    pub category: String,
    pub created_at: StoredInstant,
    /// Set on every update that carried at least one field.
    pub updated_at: Option<StoredInstant>,
}

impl<'r> FromRow<'r, SqliteRow> for QaItem {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let created_at: String = row.try_get("created_at")?;
        let updated_at: Option<String> = row.try_get("updated_at")?;

        Ok(Self {
            id: row.try_get("id")?,
            question: row.try_get("question")?,
            answer: row.try_get("answer")?,
            category: row.try_get("category")?,
            created_at: decode_instant("created_at", &created_at)?,
            updated_at: updated_at
                .as_deref()
                .map(|raw| decode_instant("updated_at", raw))
                .transpose()?,
        })
    }
}

fn decode_instant(column: &str, raw: &str) -> Result<StoredInstant, sqlx::Error> {
    raw.parse::<StoredInstant>()
        .map_err(|e| sqlx::Error::ColumnDecode {
            index: column.to_string(),
            source: Box::new(e),
        })
}

impl QaItem {
    /// Client-facing representation with display-formatted timestamps.
    pub fn to_record(&self) -> QaRecord {
        QaRecord::new(
            self.id,
            self.question.clone(),
            self.answer.clone(),
            self.category.clone(),
            Some(self.created_at),
            self.updated_at,
        )
    }
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for submitting a new QA item.
///
/// Missing fields deserialize as empty strings so they fail validation
/// like any other empty value.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CreateQaItem {
    #[validate(length(min = 1, message = "question must not be empty"))]
    pub question: String,
    #[validate(length(min = 1, message = "answer must not be empty"))]
    pub answer: String,
    #[validate(length(min = 1, message = "category must not be empty"))]
    pub category: String,
}

/// DTO for partially updating a QA item.
///
/// An omitted (or `null`) field is left unchanged. A payload with no fields
/// at all is a no-op, see [`UpdateQaItem::is_empty`].
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateQaItem {
    #[validate(length(min = 1, message = "question must not be empty"))]
    pub question: Option<String>,
    #[validate(length(min = 1, message = "answer must not be empty"))]
    pub answer: Option<String>,
    #[validate(length(min = 1, message = "category must not be empty"))]
    pub category: Option<String>,
}

impl UpdateQaItem {
    /// `true` when the payload carries no field to change.
    pub fn is_empty(&self) -> bool {
        self.question.is_none() && self.answer.is_none() && self.category.is_none()
    }
}

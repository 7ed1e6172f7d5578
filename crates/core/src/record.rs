//! Client-facing representation of a QA item.

use serde::Serialize;

use crate::timestamp::{format_timestamp, StoredInstant};
use crate::types::DbId;

/// A QA item as returned by the read endpoints and written to exports.
///
/// Field names are fixed for compatibility: the creation instant is exposed
/// as `timestamp` and the last mutation as `updated_timestamp`, both rendered
/// through [`format_timestamp`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QaRecord {
    pub id: DbId,
    pub question: String,
    pub answer: String,
    pub category: String,
    pub timestamp: Option<String>,
    pub updated_timestamp: Option<String>,
}

impl QaRecord {
    /// Build a record, rendering both instants for display.
    pub fn new<C, U>(
        id: DbId,
        question: String,
        answer: String,
        category: String,
        created_at: Option<C>,
        updated_at: Option<U>,
    ) -> Self
    where
        C: Into<StoredInstant>,
        U: Into<StoredInstant>,
    {
        Self {
            id,
            question,
            answer,
            category,
            timestamp: format_timestamp(created_at),
            updated_timestamp: format_timestamp(updated_at),
        }
    }
}

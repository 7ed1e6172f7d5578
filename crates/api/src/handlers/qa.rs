//! Handlers for QA items.
//!
//! Submission checks that the referenced category exists by name. Updates
//! are partial: only fields present in the payload are written, and a
//! payload with no fields is answered without touching storage.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use qabank_core::error::CoreError;
use qabank_core::record::QaRecord;
use qabank_core::timestamp::format_timestamp;
use qabank_core::types::DbId;
use qabank_core::validation::{require_non_blank, require_non_blank_if_present};
use qabank_db::models::qa_item::{CreateQaItem, UpdateQaItem};
use qabank_db::repositories::{CategoryRepo, QaItemRepo};
use serde::Serialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::response::MessageResponse;
use crate::state::AppState;

const ENTITY: &str = "QA item";

pub const MSG_CREATED: &str = "Question and answer saved successfully!";
pub const MSG_UPDATED: &str = "Q&A pair updated successfully!";
pub const MSG_NO_UPDATES: &str = "No updates provided.";
pub const MSG_DELETED: &str = "Q&A pair deleted successfully!";

/// Body returned by a successful submission.
#[derive(Debug, Serialize)]
pub struct QaSubmitted {
    pub message: &'static str,
    pub id: DbId,
    /// Creation instant, display-formatted.
    pub created_at: Option<String>,
}

/// POST /qa/submit_qa/
///
/// Store a new question/answer pair under an existing category.
pub async fn submit_qa_item(
    State(state): State<AppState>,
    Json(input): Json<CreateQaItem>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    require_non_blank("question", &input.question)?;
    require_non_blank("answer", &input.answer)?;
    require_non_blank("category", &input.category)?;

    if CategoryRepo::find_by_name(&state.pool, &input.category)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Category '{}' does not exist",
            input.category
        ))));
    }

    let item = QaItemRepo::create(&state.pool, &input).await?;

    tracing::info!(qa_id = item.id, category = %item.category, "QA item created");

    Ok(Json(QaSubmitted {
        message: MSG_CREATED,
        id: item.id,
        created_at: format_timestamp(Some(item.created_at)),
    }))
}

/// GET /qa/
///
/// List every QA item. Empty storage yields an empty array.
pub async fn list_qa_items(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let items = QaItemRepo::list(&state.pool).await?;
    let records: Vec<QaRecord> = items.iter().map(|i| i.to_record()).collect();

    Ok(Json(records))
}

/// GET /qa/{id}
pub async fn get_qa_item(
    State(state): State<AppState>,
    Path(qa_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let item = QaItemRepo::find_by_id(&state.pool, qa_id)
        .await?
        .ok_or_else(|| not_found(qa_id))?;

    Ok(Json(item.to_record()))
}

/// PUT /qa/{id}
///
/// Partially update a QA item. Answers with a distinct message when the
/// payload carried no fields, in which case nothing is written.
pub async fn update_qa_item(
    State(state): State<AppState>,
    Path(qa_id): Path<DbId>,
    Json(input): Json<UpdateQaItem>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    require_non_blank_if_present("question", input.question.as_deref())?;
    require_non_blank_if_present("answer", input.answer.as_deref())?;
    require_non_blank_if_present("category", input.category.as_deref())?;

    if QaItemRepo::find_by_id(&state.pool, qa_id).await?.is_none() {
        return Err(not_found(qa_id));
    }

    if input.is_empty() {
        tracing::debug!(qa_id, "QA update carried no fields");
        return Ok(Json(MessageResponse::new(MSG_NO_UPDATES)));
    }

    QaItemRepo::update(&state.pool, qa_id, &input)
        .await?
        .ok_or_else(|| not_found(qa_id))?;

    tracing::info!(qa_id, "QA item updated");

    Ok(Json(MessageResponse::new(MSG_UPDATED)))
}

/// DELETE /qa/{id}
pub async fn delete_qa_item(
    State(state): State<AppState>,
    Path(qa_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !QaItemRepo::delete(&state.pool, qa_id).await? {
        return Err(not_found(qa_id));
    }

    tracing::info!(qa_id, "QA item deleted");

    Ok(Json(MessageResponse::new(MSG_DELETED)))
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: ENTITY, id })
}

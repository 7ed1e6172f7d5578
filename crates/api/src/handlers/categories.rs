//! Handlers for categories.
//!
//! QA items reference categories by name, so renames do not reach existing
//! items and deletion is refused while any item still uses the name.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use qabank_core::error::CoreError;
use qabank_core::types::DbId;
use qabank_core::validation::require_non_blank;
use qabank_db::models::category::{Category, CreateCategory, UpdateCategory};
use qabank_db::repositories::{CategoryRepo, QaItemRepo};
use serde::Serialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::response::MessageResponse;
use crate::state::AppState;

const ENTITY: &str = "Category";

pub const MSG_CREATED: &str = "Category added successfully!";
pub const MSG_UPDATED: &str = "Category updated successfully!";
pub const MSG_DELETED: &str = "Category deleted successfully!";

/// Body returned by create and rename.
#[derive(Debug, Serialize)]
pub struct CategoryChanged {
    pub message: &'static str,
    pub id: DbId,
    pub name: String,
}

impl CategoryChanged {
    fn new(message: &'static str, category: Category) -> Self {
        Self {
            message,
            id: category.id,
            name: category.name,
        }
    }
}

/// POST /categories/
pub async fn create_category(
    State(state): State<AppState>,
    Json(input): Json<CreateCategory>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    require_non_blank("name", &input.name)?;

    if CategoryRepo::name_taken(&state.pool, &input.name, None).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "Category already exists".into(),
        )));
    }

    let category = CategoryRepo::create(&state.pool, &input).await?;

    tracing::info!(category_id = category.id, name = %category.name, "Category created");

    Ok(Json(CategoryChanged::new(MSG_CREATED, category)))
}

/// PUT /categories/{id}
///
/// Rename a category. The new name must not belong to another category.
pub async fn update_category(
    State(state): State<AppState>,
    Path(category_id): Path<DbId>,
    Json(input): Json<UpdateCategory>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    require_non_blank("name", &input.name)?;

    if CategoryRepo::find_by_id(&state.pool, category_id)
        .await?
        .is_none()
    {
        return Err(not_found(category_id));
    }

    if CategoryRepo::name_taken(&state.pool, &input.name, Some(category_id)).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "Category name already exists".into(),
        )));
    }

    let category = CategoryRepo::update(&state.pool, category_id, &input)
        .await?
        .ok_or_else(|| not_found(category_id))?;

    tracing::info!(category_id, name = %category.name, "Category renamed");

    Ok(Json(CategoryChanged::new(MSG_UPDATED, category)))
}

/// DELETE /categories/{id}
///
/// Refused with a conflict while any QA item is filed under the category.
pub async fn delete_category(
    State(state): State<AppState>,
    Path(category_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let category = CategoryRepo::find_by_id(&state.pool, category_id)
        .await?
        .ok_or_else(|| not_found(category_id))?;

    let in_use = QaItemRepo::count_by_category(&state.pool, &category.name).await?;
    if in_use > 0 {
        return Err(AppError::Core(CoreError::Conflict(
            "Cannot delete category; it is in use by Q&A items".into(),
        )));
    }

    if !CategoryRepo::delete(&state.pool, category_id).await? {
        return Err(not_found(category_id));
    }

    tracing::info!(category_id, name = %category.name, "Category deleted");

    Ok(Json(MessageResponse::new(MSG_DELETED)))
}

/// GET /categories/
pub async fn list_categories(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let categories = CategoryRepo::list(&state.pool).await?;

    Ok(Json(categories))
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: ENTITY, id })
}

//! Category model and DTOs.

use qabank_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
}

/// DTO for creating a category.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CreateCategory {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
}

/// DTO for renaming a category.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct UpdateCategory {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
}

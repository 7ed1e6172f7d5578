//! Repository for the `qa_items` table.

use chrono::Utc;
use qabank_core::types::DbId;
use sqlx::SqlitePool;

use crate::models::qa_item::{CreateQaItem, QaItem, UpdateQaItem};

/// Column list for `qa_items` queries.
const COLUMNS: &str = "id, question, answer, category, created_at, updated_at";

/// Provides CRUD operations for QA items.
pub struct QaItemRepo;

impl QaItemRepo {
    /// Insert a new QA item stamped with the current instant.
    pub async fn create(pool: &SqlitePool, dto: &CreateQaItem) -> Result<QaItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO qa_items (question, answer, category, created_at) \
             VALUES (?1, ?2, ?3, ?4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, QaItem>(&query)
            .bind(&dto.question)
            .bind(&dto.answer)
            .bind(&dto.category)
            .bind(Utc::now())
            .fetch_one(pool)
            .await
    }

    /// Find a QA item by its ID.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<QaItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM qa_items WHERE id = ?1");
        sqlx::query_as::<_, QaItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every QA item in storage order (ascending id).
    pub async fn list(pool: &SqlitePool) -> Result<Vec<QaItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM qa_items ORDER BY id");
        sqlx::query_as::<_, QaItem>(&query).fetch_all(pool).await
    }

    /// Apply the present fields of `dto` and stamp `updated_at`.
    ///
    /// Uses `COALESCE` so only provided fields are changed. Callers are
    /// expected to skip the call entirely for an empty DTO. Returns `None`
    /// if no row with `id` exists.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        dto: &UpdateQaItem,
    ) -> Result<Option<QaItem>, sqlx::Error> {
        let query = format!(
            "UPDATE qa_items SET \
                 question = COALESCE(?2, question), \
                 answer = COALESCE(?3, answer), \
                 category = COALESCE(?4, category), \
                 updated_at = ?5 \
             WHERE id = ?1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, QaItem>(&query)
            .bind(id)
            .bind(&dto.question)
            .bind(&dto.answer)
            .bind(&dto.category)
            .bind(Utc::now())
            .fetch_optional(pool)
            .await
    }

    /// Delete a QA item by ID.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM qa_items WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Number of QA items filed under the category `name`.
    pub async fn count_by_category(pool: &SqlitePool, name: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM qa_items WHERE category = ?1")
            .bind(name)
            .fetch_one(pool)
            .await
    }
}

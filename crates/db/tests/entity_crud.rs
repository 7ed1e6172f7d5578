//! Integration tests for the QA item and category repositories.
//!
//! Exercises the repository layer against a throwaway SQLite database:
//! - Create / read / list / delete round trips
//! - Partial updates and the `updated_at` stamp
//! - Category name lookups, uniqueness checks, usage counts

use qabank_db::models::category::{CreateCategory, UpdateCategory};
use qabank_db::models::qa_item::{CreateQaItem, UpdateQaItem};
use qabank_db::repositories::{CategoryRepo, QaItemRepo};
use sqlx::SqlitePool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_item(question: &str, category: &str) -> CreateQaItem {
    CreateQaItem {
        question: question.to_string(),
        answer: format!("answer to {question}"),
        category: category.to_string(),
    }
}

fn new_category(name: &str) -> CreateCategory {
    CreateCategory {
        name: name.to_string(),
    }
}

// ---------------------------------------------------------------------------
// QA items
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_assigns_fresh_ids(pool: SqlitePool) {
    let first = QaItemRepo::create(&pool, &new_item("Q1", "general"))
        .await
        .unwrap();
    let second = QaItemRepo::create(&pool, &new_item("Q2", "general"))
        .await
        .unwrap();

    assert_eq!(first.id, 1);
    assert!(second.id > first.id);
    assert_eq!(first.question, "Q1");
    assert!(first.updated_at.is_none());
    assert!(first.to_record().timestamp.is_some_and(|t| !t.is_empty()));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_and_list(pool: SqlitePool) {
    assert!(QaItemRepo::list(&pool).await.unwrap().is_empty());
    assert!(QaItemRepo::find_by_id(&pool, 1).await.unwrap().is_none());

    let created = QaItemRepo::create(&pool, &new_item("Q1", "general"))
        .await
        .unwrap();
    QaItemRepo::create(&pool, &new_item("Q2", "other"))
        .await
        .unwrap();

    let found = QaItemRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.question, "Q1");
    assert_eq!(found.created_at, created.created_at);

    let all = QaItemRepo::list(&pool).await.unwrap();
    let questions: Vec<_> = all.iter().map(|i| i.question.as_str()).collect();
    assert_eq!(questions, ["Q1", "Q2"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_partial_update_keeps_absent_fields(pool: SqlitePool) {
    let created = QaItemRepo::create(&pool, &new_item("Q1", "general"))
        .await
        .unwrap();

    let update = UpdateQaItem {
        answer: Some("A2".into()),
        ..Default::default()
    };
    let updated = QaItemRepo::update(&pool, created.id, &update)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.question, "Q1");
    assert_eq!(updated.answer, "A2");
    assert_eq!(updated.category, "general");
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_missing_returns_none(pool: SqlitePool) {
    let update = UpdateQaItem {
        question: Some("Q".into()),
        ..Default::default()
    };
    assert!(QaItemRepo::update(&pool, 42, &update).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete(pool: SqlitePool) {
    let created = QaItemRepo::create(&pool, &new_item("Q1", "general"))
        .await
        .unwrap();

    assert!(QaItemRepo::delete(&pool, created.id).await.unwrap());
    assert!(!QaItemRepo::delete(&pool, created.id).await.unwrap());
    assert!(QaItemRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_count_by_category(pool: SqlitePool) {
    QaItemRepo::create(&pool, &new_item("Q1", "general"))
        .await
        .unwrap();
    QaItemRepo::create(&pool, &new_item("Q2", "general"))
        .await
        .unwrap();
    QaItemRepo::create(&pool, &new_item("Q3", "other"))
        .await
        .unwrap();

    assert_eq!(QaItemRepo::count_by_category(&pool, "general").await.unwrap(), 2);
    assert_eq!(QaItemRepo::count_by_category(&pool, "other").await.unwrap(), 1);
    assert_eq!(QaItemRepo::count_by_category(&pool, "none").await.unwrap(), 0);
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_category_crud(pool: SqlitePool) {
    let general = CategoryRepo::create(&pool, &new_category("general"))
        .await
        .unwrap();
    assert_eq!(general.name, "general");

    let by_name = CategoryRepo::find_by_name(&pool, "general")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_name.id, general.id);

    let renamed = CategoryRepo::update(
        &pool,
        general.id,
        &UpdateCategory {
            name: "misc".into(),
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(renamed.name, "misc");
    assert!(CategoryRepo::find_by_name(&pool, "general")
        .await
        .unwrap()
        .is_none());

    assert!(CategoryRepo::delete(&pool, general.id).await.unwrap());
    assert!(CategoryRepo::find_by_id(&pool, general.id)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_name_taken_excludes_self(pool: SqlitePool) {
    let general = CategoryRepo::create(&pool, &new_category("general"))
        .await
        .unwrap();
    let other = CategoryRepo::create(&pool, &new_category("other"))
        .await
        .unwrap();

    assert!(CategoryRepo::name_taken(&pool, "general", None).await.unwrap());
    assert!(!CategoryRepo::name_taken(&pool, "general", Some(general.id))
        .await
        .unwrap());
    assert!(CategoryRepo::name_taken(&pool, "general", Some(other.id))
        .await
        .unwrap());
    assert!(!CategoryRepo::name_taken(&pool, "fresh", None).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rename_does_not_touch_items(pool: SqlitePool) {
    let general = CategoryRepo::create(&pool, &new_category("general"))
        .await
        .unwrap();
    let item = QaItemRepo::create(&pool, &new_item("Q1", "general"))
        .await
        .unwrap();

    CategoryRepo::update(
        &pool,
        general.id,
        &UpdateCategory {
            name: "renamed".into(),
        },
    )
    .await
    .unwrap();

    let item = QaItemRepo::find_by_id(&pool, item.id).await.unwrap().unwrap();
    assert_eq!(item.category, "general");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_categories(pool: SqlitePool) {
    assert!(CategoryRepo::list(&pool).await.unwrap().is_empty());

    CategoryRepo::create(&pool, &new_category("b")).await.unwrap();
    CategoryRepo::create(&pool, &new_category("a")).await.unwrap();

    let names: Vec<_> = CategoryRepo::list(&pool)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, ["b", "a"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_zone_less_timestamps_decode_as_display_local(pool: SqlitePool) {
    sqlx::query(
        "INSERT INTO qa_items (question, answer, category, created_at, updated_at) \
         VALUES ('Q', 'A', 'general', '2025-03-05 14:30:00', '2025-03-06T09:05:00')",
    )
    .execute(&pool)
    .await
    .unwrap();

    let item = QaItemRepo::find_by_id(&pool, 1).await.unwrap().unwrap();
    let record = item.to_record();

    assert_eq!(record.timestamp.as_deref(), Some("05-03-25 02:30PM"));
    assert_eq!(record.updated_timestamp.as_deref(), Some("06-03-25 09:05AM"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unreadable_timestamp_is_a_decode_error(pool: SqlitePool) {
    sqlx::query(
        "INSERT INTO qa_items (question, answer, category, created_at) \
         VALUES ('Q', 'A', 'general', 'last tuesday')",
    )
    .execute(&pool)
    .await
    .unwrap();

    let err = QaItemRepo::find_by_id(&pool, 1).await.unwrap_err();
    assert!(matches!(err, sqlx::Error::ColumnDecode { ref index, .. } if index == "created_at"));
}

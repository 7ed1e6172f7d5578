//! SQLite storage for QA items and categories.
//!
//! Owns the connection pool, schema migrations, row models, and the
//! repository structs used by the API handlers.

use std::path::PathBuf;
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::SqlitePool;

/// Create a connection pool from a database URL.
///
/// The database file is created on first connect if it does not exist.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
}

/// Path of the database file a connection URL points at.
///
/// The backup scheduler copies this file, so it is derived from the same URL
/// the pool connects with.
pub fn database_file(database_url: &str) -> Result<PathBuf, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?;
    Ok(options.get_filename().to_path_buf())
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_file_follows_the_url() {
        assert_eq!(
            database_file("sqlite://qa.db?mode=rwc").unwrap(),
            PathBuf::from("qa.db")
        );
        assert_eq!(
            database_file("sqlite://data/other.db").unwrap(),
            PathBuf::from("data/other.db")
        );
    }
}

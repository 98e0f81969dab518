mod mealplan_repo;
mod shopping_repo;

pub use mealplan_repo::MealPlanRepository;
pub use shopping_repo::ShoppingListRepository;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{Sqlite, Transaction};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Errors returned by the repositories.
#[derive(Error, Debug)]
pub enum RepoError {
    /// The caller supplied input that can never be stored (empty text, a
    /// reorder that does not match the stored items).
    #[error("{0}")]
    Validation(String),

    /// No day or item matches the given key.
    #[error("{0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Failed to create database directory: {0}")]
    Io(#[from] std::io::Error),
}

/// Open (creating if needed) the SQLite database at `path` and run migrations.
///
/// The returned pool is the single shared handle for the process.
pub async fn init_db(path: &Path) -> Result<SqlitePool, RepoError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let db_url = format!("sqlite:{}?mode=rwc", path.display());

    let options = SqliteConnectOptions::from_str(&db_url)?
        .foreign_keys(true)
        .create_if_missing(true)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

/// Begin a transaction that holds the write lock from its first statement.
///
/// A deferred transaction that reads before writing cannot upgrade its lock
/// while another writer is active and fails with `SQLITE_BUSY` without
/// waiting. `BEGIN IMMEDIATE` queues on the busy timeout instead.
pub(crate) async fn begin_write(
    pool: &SqlitePool,
) -> Result<Transaction<'static, Sqlite>, sqlx::Error> {
    pool.begin_with("BEGIN IMMEDIATE").await
}

/// Trim user supplied text and reject it if nothing is left.
pub(crate) fn require_text<'a>(text: &'a str, what: &str) -> Result<&'a str, RepoError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(RepoError::Validation(format!("{} cannot be empty", what)));
    }
    Ok(trimmed)
}

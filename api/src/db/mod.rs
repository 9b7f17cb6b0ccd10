//! SQLite persistence for users, products and favorites.
//!
//! # Tables
//!
//! - `users` - credentials (email is unique)
//! - `products` - the catalog
//! - `favorites` - ordered user -> product references, unique per pair
//!
//! Migrations live in `api/migrations/` and are embedded into the binary.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use thiserror::Error;

pub mod favorites;
pub mod products;
pub mod users;

pub use favorites::FavoriteRepository;
pub use products::ProductRepository;
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Unique constraint violation.
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Map a unique-constraint failure to `RepositoryError::Conflict`, leaving
/// every other error as a plain database error.
pub(crate) fn map_unique_violation(err: sqlx::Error, what: &str) -> RepositoryError {
    match err.as_database_error() {
        Some(db_err) if db_err.is_unique_violation() => RepositoryError::Conflict(what.to_string()),
        _ => RepositoryError::Database(err),
    }
}

/// Open a SQLite pool, creating the database file if it does not exist.
///
/// In-memory databases (`sqlite::memory:`) should be opened with a single
/// connection so that every query sees the same database.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the URL is invalid or the
/// connection cannot be established.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, RepositoryError> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Apply the embedded migrations.
///
/// # Errors
///
/// Returns `RepositoryError::Migration` if a migration fails to apply.
pub async fn migrate(pool: &SqlitePool) -> Result<(), RepositoryError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    let pool = connect("sqlite::memory:", 1).await.unwrap();
    migrate(&pool).await.unwrap();
    pool
}

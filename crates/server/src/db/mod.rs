//! Database operations for the reader's `SQLite` store.
//!
//! ## Tables
//!
//! - `users` - Cached identity profiles (email, name, admin flag)
//! - `webtoons` - Catalog titles
//! - `chapters` - Installments, with pages as a comma-delimited column
//! - `comments` - Reader comments per chapter
//! - `history` - One last-read marker per (user, webtoon)
//! - `tower_sessions` - Session storage, created by the session store itself
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/`, embedded into the
//! binary, and applied at startup. They can also be run explicitly:
//! ```bash
//! cargo run -p webtoon-cli -- migrate
//! ```

pub mod chapters;
pub mod comments;
pub mod history;
pub mod users;
pub mod webtoons;

use std::str::FromStr;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use thiserror::Error;

pub use chapters::ChapterRepository;
pub use comments::CommentRepository;
pub use history::HistoryRepository;
pub use users::UserRepository;
pub use webtoons::WebtoonRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

impl RepositoryError {
    /// Map a unique-constraint violation to `Conflict`, anything else to `Database`.
    pub(crate) fn from_insert(err: sqlx::Error, what: &str) -> Self {
        if let sqlx::Error::Database(ref db_err) = err
            && db_err.is_unique_violation()
        {
            return Self::Conflict(format!("{what} already exists"));
        }
        Self::Database(err)
    }
}

/// Create a `SQLite` connection pool, creating the database file if needed.
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string, e.g. `sqlite://site.db`
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL is invalid or the database cannot be opened.
pub async fn create_pool(database_url: &SecretString) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url.expose_secret())?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal);

    SqlitePoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

/// Create a pool over a private in-memory database.
///
/// The pool holds exactly one connection that is never recycled, since an
/// in-memory database lives only as long as its connection.
///
/// # Errors
///
/// Returns `sqlx::Error` if `SQLite` cannot be opened.
pub async fn create_memory_pool() -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
}

/// Apply the embedded migrations ("create tables if absent").
///
/// # Errors
///
/// Returns `MigrateError` if a migration fails or the applied history diverges.
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Shared fixtures for repository tests.

    use sqlx::SqlitePool;
    use webtoon_core::{Email, ImageSequence};

    use super::{ChapterRepository, UserRepository, WebtoonRepository};
    use crate::models::{Chapter, NewChapter, NewWebtoon, User, Webtoon};

    #[allow(clippy::unwrap_used)]
    pub async fn pool() -> SqlitePool {
        let pool = super::create_memory_pool().await.unwrap();
        super::migrate(&pool).await.unwrap();
        pool
    }

    #[allow(clippy::unwrap_used)]
    pub async fn user(pool: &SqlitePool, email: &str) -> User {
        UserRepository::new(pool)
            .create(&Email::from(email), "User", false)
            .await
            .unwrap()
    }

    #[allow(clippy::unwrap_used)]
    pub async fn webtoon(pool: &SqlitePool, title: &str) -> Webtoon {
        WebtoonRepository::new(pool)
            .create(&NewWebtoon {
                title: title.to_owned(),
                description: format!("{title} description"),
                cover_image: format!("https://img.example.com/{title}.png"),
            })
            .await
            .unwrap()
    }

    #[allow(clippy::unwrap_used)]
    pub async fn chapter(pool: &SqlitePool, webtoon: &Webtoon, images: &[&str]) -> Chapter {
        ChapterRepository::new(pool)
            .create(&NewChapter {
                webtoon_id: webtoon.id,
                title: "Episode 1".to_owned(),
                images: ImageSequence::new(images.iter().map(|s| (*s).to_owned()).collect())
                    .unwrap(),
            })
            .await
            .unwrap()
    }
}

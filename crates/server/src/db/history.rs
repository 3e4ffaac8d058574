//! Reading history repository.
//!
//! At most one row exists per (user, webtoon). Writes go through a single
//! `INSERT ... ON CONFLICT DO UPDATE` against the unique index, so concurrent
//! reads of the same title by the same user converge on one row.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use webtoon_core::{HistoryId, UserId, WebtoonId};

use super::RepositoryError;
use crate::models::HistoryEntry;

#[derive(sqlx::FromRow)]
struct HistoryRow {
    id: HistoryId,
    user_id: UserId,
    webtoon_id: WebtoonId,
    last_read: DateTime<Utc>,
}

impl From<HistoryRow> for HistoryEntry {
    fn from(row: HistoryRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            webtoon_id: row.webtoon_id,
            last_read: row.last_read,
        }
    }
}

/// Repository for reading history.
pub struct HistoryRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> HistoryRepository<'a> {
    /// Create a new history repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Mark `webtoon_id` as read by `user_id` at `read_at`.
    ///
    /// Inserts the marker on first read and moves `last_read` forward on every
    /// later one.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the upsert fails.
    pub async fn record_read(
        &self,
        user_id: UserId,
        webtoon_id: WebtoonId,
        read_at: DateTime<Utc>,
    ) -> Result<HistoryEntry, RepositoryError> {
        let row = sqlx::query_as::<_, HistoryRow>(
            r"
            INSERT INTO history (user_id, webtoon_id, last_read)
            VALUES (?, ?, ?)
            ON CONFLICT (user_id, webtoon_id)
            DO UPDATE SET last_read = excluded.last_read
            RETURNING id, user_id, webtoon_id, last_read
            ",
        )
        .bind(user_id)
        .bind(webtoon_id)
        .bind(read_at)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Get the marker for a (user, webtoon) pair.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(
        &self,
        user_id: UserId,
        webtoon_id: WebtoonId,
    ) -> Result<Option<HistoryEntry>, RepositoryError> {
        let row = sqlx::query_as::<_, HistoryRow>(
            r"
            SELECT id, user_id, webtoon_id, last_read
            FROM history
            WHERE user_id = ? AND webtoon_id = ?
            ",
        )
        .bind(user_id)
        .bind(webtoon_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(HistoryEntry::from))
    }

    /// Count the markers for a (user, webtoon) pair. Always 0 or 1.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self, user_id: UserId, webtoon_id: WebtoonId) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM history WHERE user_id = ? AND webtoon_id = ?",
        )
        .bind(user_id)
        .bind(webtoon_id)
        .fetch_one(self.pool)
        .await?;
        Ok(count)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::db::test_support;

    #[tokio::test]
    async fn test_second_read_updates_in_place() {
        let pool = test_support::pool().await;
        let user = test_support::user(&pool, "reader@example.com").await;
        let webtoon = test_support::webtoon(&pool, "reread").await;
        let repo = HistoryRepository::new(&pool);

        let first_read = Utc.with_ymd_and_hms(2026, 5, 1, 9, 0, 0).unwrap();
        let second_read = Utc.with_ymd_and_hms(2026, 5, 2, 21, 30, 0).unwrap();

        let first = repo.record_read(user.id, webtoon.id, first_read).await.unwrap();
        let second = repo.record_read(user.id, webtoon.id, second_read).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(repo.count(user.id, webtoon.id).await.unwrap(), 1);

        let stored = repo.get(user.id, webtoon.id).await.unwrap().unwrap();
        assert_eq!(stored.last_read, second_read);
    }

    #[tokio::test]
    async fn test_pairs_are_independent() {
        let pool = test_support::pool().await;
        let alice = test_support::user(&pool, "alice@example.com").await;
        let bob = test_support::user(&pool, "bob@example.com").await;
        let webtoon = test_support::webtoon(&pool, "shared").await;
        let repo = HistoryRepository::new(&pool);

        repo.record_read(alice.id, webtoon.id, Utc::now()).await.unwrap();
        repo.record_read(bob.id, webtoon.id, Utc::now()).await.unwrap();

        assert_eq!(repo.count(alice.id, webtoon.id).await.unwrap(), 1);
        assert_eq!(repo.count(bob.id, webtoon.id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_unread_pair_is_none() {
        let pool = test_support::pool().await;
        let user = test_support::user(&pool, "reader@example.com").await;
        let webtoon = test_support::webtoon(&pool, "unread").await;

        let entry = HistoryRepository::new(&pool)
            .get(user.id, webtoon.id)
            .await
            .unwrap();
        assert!(entry.is_none());
    }
}

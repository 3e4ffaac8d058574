//! Webtoon repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use webtoon_core::{UserId, WebtoonId};

use super::RepositoryError;
use crate::models::{NewWebtoon, Webtoon};

#[derive(sqlx::FromRow)]
struct WebtoonRow {
    id: WebtoonId,
    title: String,
    description: String,
    cover_image: String,
    created_at: DateTime<Utc>,
}

impl From<WebtoonRow> for Webtoon {
    fn from(row: WebtoonRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            cover_image: row.cover_image,
            created_at: row.created_at,
        }
    }
}

/// Repository for webtoon database operations.
pub struct WebtoonRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> WebtoonRepository<'a> {
    /// Create a new webtoon repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List every webtoon, most recently added first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_newest_first(&self) -> Result<Vec<Webtoon>, RepositoryError> {
        let rows = sqlx::query_as::<_, WebtoonRow>(
            r"
            SELECT id, title, description, cover_image, created_at
            FROM webtoons
            ORDER BY created_at DESC, id DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Webtoon::from).collect())
    }

    /// Get a webtoon by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: WebtoonId) -> Result<Option<Webtoon>, RepositoryError> {
        let row = sqlx::query_as::<_, WebtoonRow>(
            r"
            SELECT id, title, description, cover_image, created_at
            FROM webtoons
            WHERE id = ?
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Webtoon::from))
    }

    /// Insert a webtoon stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, new: &NewWebtoon) -> Result<Webtoon, RepositoryError> {
        let row = sqlx::query_as::<_, WebtoonRow>(
            r"
            INSERT INTO webtoons (title, description, cover_image, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING id, title, description, cover_image, created_at
            ",
        )
        .bind(&new.title)
        .bind(&new.description)
        .bind(&new.cover_image)
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// The webtoons a user read most recently, newest first, at most `limit`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn recently_viewed(
        &self,
        user_id: UserId,
        limit: i64,
    ) -> Result<Vec<Webtoon>, RepositoryError> {
        let rows = sqlx::query_as::<_, WebtoonRow>(
            r"
            SELECT w.id, w.title, w.description, w.cover_image, w.created_at
            FROM history h
            JOIN webtoons w ON w.id = h.webtoon_id
            WHERE h.user_id = ?
            ORDER BY h.last_read DESC, h.id DESC
            LIMIT ?
            ",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Webtoon::from).collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;
    use crate::db::{HistoryRepository, test_support};

    #[tokio::test]
    async fn test_create_round_trips_fields() {
        let pool = test_support::pool().await;
        let repo = WebtoonRepository::new(&pool);

        let created = repo
            .create(&NewWebtoon {
                title: "Tower of Dawn".to_owned(),
                description: "A climb.".to_owned(),
                cover_image: "https://img.example.com/tower.png".to_owned(),
            })
            .await
            .unwrap();

        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.title, "Tower of Dawn");
        assert_eq!(fetched.description, "A climb.");
        assert_eq!(fetched.cover_image, "https://img.example.com/tower.png");
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let pool = test_support::pool().await;
        let first = test_support::webtoon(&pool, "first").await;
        let second = test_support::webtoon(&pool, "second").await;

        let titles: Vec<_> = WebtoonRepository::new(&pool)
            .list_newest_first()
            .await
            .unwrap()
            .into_iter()
            .map(|w| w.id)
            .collect();
        assert_eq!(titles, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn test_recently_viewed_orders_and_limits() {
        let pool = test_support::pool().await;
        let user = test_support::user(&pool, "reader@example.com").await;
        let history = HistoryRepository::new(&pool);
        let base = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();

        let mut ids = Vec::new();
        for (i, title) in ["a", "b", "c", "d", "e", "f", "g"].into_iter().enumerate() {
            let webtoon = test_support::webtoon(&pool, title).await;
            let offset = i64::try_from(i).unwrap();
            history
                .record_read(user.id, webtoon.id, base + Duration::minutes(offset))
                .await
                .unwrap();
            ids.push(webtoon.id);
        }

        let recent: Vec<_> = WebtoonRepository::new(&pool)
            .recently_viewed(user.id, 5)
            .await
            .unwrap()
            .into_iter()
            .map(|w| w.id)
            .collect();

        ids.reverse();
        ids.truncate(5);
        assert_eq!(recent, ids);
    }

    #[tokio::test]
    async fn test_recently_viewed_is_per_user() {
        let pool = test_support::pool().await;
        let reader = test_support::user(&pool, "reader@example.com").await;
        let other = test_support::user(&pool, "other@example.com").await;
        let webtoon = test_support::webtoon(&pool, "solo").await;

        HistoryRepository::new(&pool)
            .record_read(other.id, webtoon.id, Utc::now())
            .await
            .unwrap();

        let recent = WebtoonRepository::new(&pool)
            .recently_viewed(reader.id, 5)
            .await
            .unwrap();
        assert!(recent.is_empty());
    }
}

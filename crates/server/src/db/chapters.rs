//! Chapter repository for database operations.
//!
//! Pages cross the storage boundary as an [`ImageSequence`]; the delimited
//! `content_images` column never leaves this module as a raw string.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use webtoon_core::{ChapterId, ImageSequence, WebtoonId};

use super::RepositoryError;
use crate::models::{Chapter, NewChapter};

#[derive(sqlx::FromRow)]
struct ChapterRow {
    id: ChapterId,
    title: String,
    content_images: String,
    webtoon_id: WebtoonId,
    posted_at: DateTime<Utc>,
}

impl From<ChapterRow> for Chapter {
    fn from(row: ChapterRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            images: ImageSequence::decode(&row.content_images),
            webtoon_id: row.webtoon_id,
            posted_at: row.posted_at,
        }
    }
}

/// Repository for chapter database operations.
pub struct ChapterRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ChapterRepository<'a> {
    /// Create a new chapter repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a chapter by its ID, with its pages decoded.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: ChapterId) -> Result<Option<Chapter>, RepositoryError> {
        let row = sqlx::query_as::<_, ChapterRow>(
            r"
            SELECT id, title, content_images, webtoon_id, posted_at
            FROM chapters
            WHERE id = ?
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Chapter::from))
    }

    /// List a webtoon's chapters in posting order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_webtoon(
        &self,
        webtoon_id: WebtoonId,
    ) -> Result<Vec<Chapter>, RepositoryError> {
        let rows = sqlx::query_as::<_, ChapterRow>(
            r"
            SELECT id, title, content_images, webtoon_id, posted_at
            FROM chapters
            WHERE webtoon_id = ?
            ORDER BY posted_at ASC, id ASC
            ",
        )
        .bind(webtoon_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Chapter::from).collect())
    }

    /// Insert a chapter stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails, including when
    /// the webtoon does not exist.
    pub async fn create(&self, new: &NewChapter) -> Result<Chapter, RepositoryError> {
        let row = sqlx::query_as::<_, ChapterRow>(
            r"
            INSERT INTO chapters (title, content_images, webtoon_id, posted_at)
            VALUES (?, ?, ?, ?)
            RETURNING id, title, content_images, webtoon_id, posted_at
            ",
        )
        .bind(&new.title)
        .bind(new.images.encode())
        .bind(new.webtoon_id)
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }
}

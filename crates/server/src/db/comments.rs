//! Comment repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use webtoon_core::{ChapterId, CommentId, UserId};

use super::RepositoryError;
use crate::models::{Comment, CommentView};

#[derive(sqlx::FromRow)]
struct CommentRow {
    id: CommentId,
    content: String,
    posted_at: DateTime<Utc>,
    user_id: UserId,
    chapter_id: ChapterId,
}

#[derive(sqlx::FromRow)]
struct CommentViewRow {
    id: CommentId,
    content: String,
    posted_at: DateTime<Utc>,
    author_name: String,
}

/// Repository for comment database operations.
pub struct CommentRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CommentRepository<'a> {
    /// Create a new comment repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Post a comment on a chapter.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails, including when
    /// the user or chapter does not exist.
    pub async fn create(
        &self,
        user_id: UserId,
        chapter_id: ChapterId,
        content: &str,
    ) -> Result<Comment, RepositoryError> {
        let row = sqlx::query_as::<_, CommentRow>(
            r"
            INSERT INTO comments (content, posted_at, user_id, chapter_id)
            VALUES (?, ?, ?, ?)
            RETURNING id, content, posted_at, user_id, chapter_id
            ",
        )
        .bind(content)
        .bind(Utc::now())
        .bind(user_id)
        .bind(chapter_id)
        .fetch_one(self.pool)
        .await?;

        Ok(Comment {
            id: row.id,
            content: row.content,
            posted_at: row.posted_at,
            user_id: row.user_id,
            chapter_id: row.chapter_id,
        })
    }

    /// A chapter's comments with author names, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_chapter(
        &self,
        chapter_id: ChapterId,
    ) -> Result<Vec<CommentView>, RepositoryError> {
        let rows = sqlx::query_as::<_, CommentViewRow>(
            r"
            SELECT c.id, c.content, c.posted_at, u.name AS author_name
            FROM comments c
            JOIN users u ON u.id = c.user_id
            WHERE c.chapter_id = ?
            ORDER BY c.posted_at ASC, c.id ASC
            ",
        )
        .bind(chapter_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| CommentView {
                id: r.id,
                content: r.content,
                posted_at: r.posted_at,
                author_name: r.author_name,
            })
            .collect())
    }
}

//! Comment domain types.

use chrono::{DateTime, Utc};

use webtoon_core::{ChapterId, CommentId, UserId};

/// A reader comment on a chapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: CommentId,
    pub content: String,
    pub posted_at: DateTime<Utc>,
    pub user_id: UserId,
    pub chapter_id: ChapterId,
}

/// A comment joined with its author's display name, for the reader page.
#[derive(Debug, Clone)]
pub struct CommentView {
    pub id: CommentId,
    pub content: String,
    pub posted_at: DateTime<Utc>,
    pub author_name: String,
}

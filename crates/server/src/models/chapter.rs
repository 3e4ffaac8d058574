//! Chapter domain types.

use chrono::{DateTime, Utc};

use webtoon_core::{ChapterId, ImageSequence, WebtoonId};

/// A single installment of a webtoon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    pub id: ChapterId,
    pub title: String,
    /// Pages in reading order, decoded from the stored column.
    pub images: ImageSequence,
    pub webtoon_id: WebtoonId,
    pub posted_at: DateTime<Utc>,
}

/// Fields for inserting a chapter.
#[derive(Debug, Clone)]
pub struct NewChapter {
    pub webtoon_id: WebtoonId,
    pub title: String,
    pub images: ImageSequence,
}

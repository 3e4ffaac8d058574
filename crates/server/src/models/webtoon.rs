//! Webtoon domain types.

use chrono::{DateTime, Utc};

use webtoon_core::WebtoonId;

/// A serialized comic title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Webtoon {
    pub id: WebtoonId,
    pub title: String,
    pub description: String,
    /// URL or path of the cover image.
    pub cover_image: String,
    pub created_at: DateTime<Utc>,
}

/// Fields for inserting a webtoon.
#[derive(Debug, Clone)]
pub struct NewWebtoon {
    pub title: String,
    pub description: String,
    pub cover_image: String,
}

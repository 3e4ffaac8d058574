//! Reading history domain types.

use chrono::{DateTime, Utc};

use webtoon_core::{HistoryId, UserId, WebtoonId};

/// The last time a user read any chapter of a webtoon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub id: HistoryId,
    pub user_id: UserId,
    pub webtoon_id: WebtoonId,
    pub last_read: DateTime<Utc>,
}

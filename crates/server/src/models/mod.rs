//! Domain models for the reader.
//!
//! These are validated domain objects, separate from the `sqlx` row types in
//! [`crate::db`].

pub mod chapter;
pub mod comment;
pub mod history;
pub mod session;
pub mod user;
pub mod webtoon;

pub use chapter::{Chapter, NewChapter};
pub use comment::{Comment, CommentView};
pub use history::HistoryEntry;
pub use session::{SessionUser, keys as session_keys};
pub use user::User;
pub use webtoon::{NewWebtoon, Webtoon};

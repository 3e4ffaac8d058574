//! Webtoon detail route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use tracing::instrument;

use webtoon_core::WebtoonId;

use crate::db::{ChapterRepository, WebtoonRepository};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::models::{Chapter, User, Webtoon};
use crate::routes::Notice;
use crate::state::AppState;

/// A chapter row on the detail page.
pub struct ChapterLink {
    pub id: String,
    pub title: String,
    pub posted: String,
    pub pages: usize,
}

impl From<&Chapter> for ChapterLink {
    fn from(chapter: &Chapter) -> Self {
        Self {
            id: chapter.id.to_string(),
            title: chapter.title.clone(),
            posted: chapter.posted_at.format("%Y-%m-%d").to_string(),
            pages: chapter.images.len(),
        }
    }
}

/// Webtoon detail template.
#[derive(Template, WebTemplate)]
#[template(path = "webtoon.html")]
pub struct WebtoonTemplate {
    pub viewer: Option<User>,
    pub notice: Option<Notice>,
    pub webtoon: Webtoon,
    /// Chapters in posting order.
    pub chapters: Vec<ChapterLink>,
}

/// Display a webtoon and its chapters.
///
/// # Errors
///
/// Returns `AppError::NotFound` if no webtoon has this id.
#[instrument(skip(state, viewer))]
pub async fn show(
    State(state): State<AppState>,
    OptionalAuth(viewer): OptionalAuth,
    Path(id): Path<WebtoonId>,
) -> Result<WebtoonTemplate> {
    let webtoon = WebtoonRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Webtoon {id}")))?;

    let chapters = ChapterRepository::new(state.pool())
        .list_for_webtoon(webtoon.id)
        .await?
        .iter()
        .map(ChapterLink::from)
        .collect();

    Ok(WebtoonTemplate {
        viewer,
        notice: None,
        webtoon,
        chapters,
    })
}

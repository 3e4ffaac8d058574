//! Chapter reader route handlers.
//!
//! Opening a chapter while signed in moves the reader's last-read marker for
//! the parent webtoon. Comments are posted back to the same path and answered
//! with a redirect so a refresh cannot resubmit them.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::Redirect,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::instrument;

use webtoon_core::ChapterId;

use crate::db::{ChapterRepository, CommentRepository, HistoryRepository, WebtoonRepository};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::middleware::auth::LOGIN_PATH;
use crate::models::{Chapter, CommentView, User, Webtoon};
use crate::routes::Notice;
use crate::state::AppState;

/// Comment form data.
#[derive(Debug, Deserialize)]
pub struct CommentForm {
    #[serde(default)]
    pub comment: String,
}

/// A comment as shown under the pages.
pub struct CommentLine {
    pub author_name: String,
    pub content: String,
    pub posted: String,
}

impl From<CommentView> for CommentLine {
    fn from(view: CommentView) -> Self {
        Self {
            author_name: view.author_name,
            content: view.content,
            posted: view.posted_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Chapter reader template.
#[derive(Template, WebTemplate)]
#[template(path = "read.html")]
pub struct ReadTemplate {
    pub viewer: Option<User>,
    pub notice: Option<Notice>,
    pub chapter: Chapter,
    pub webtoon: Webtoon,
    /// Page image references in reading order.
    pub images: Vec<String>,
    pub comments: Vec<CommentLine>,
}

async fn load_chapter(state: &AppState, id: ChapterId) -> Result<Chapter> {
    ChapterRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Chapter {id}")))
}

async fn record_read(state: &AppState, viewer: Option<&User>, chapter: &Chapter) -> Result<()> {
    if let Some(user) = viewer {
        HistoryRepository::new(state.pool())
            .record_read(user.id, chapter.webtoon_id, Utc::now())
            .await?;
    }
    Ok(())
}

/// Display a chapter's pages and comments.
///
/// # Errors
///
/// Returns `AppError::NotFound` if no chapter has this id.
#[instrument(skip(state, viewer))]
pub async fn show(
    State(state): State<AppState>,
    OptionalAuth(viewer): OptionalAuth,
    Path(id): Path<ChapterId>,
) -> Result<ReadTemplate> {
    let chapter = load_chapter(&state, id).await?;
    record_read(&state, viewer.as_ref(), &chapter).await?;

    let webtoon = WebtoonRepository::new(state.pool())
        .get_by_id(chapter.webtoon_id)
        .await?
        .ok_or_else(|| {
            AppError::Internal(format!("chapter {id} points at a missing webtoon"))
        })?;

    let comments = CommentRepository::new(state.pool())
        .list_for_chapter(chapter.id)
        .await?
        .into_iter()
        .map(CommentLine::from)
        .collect();

    let images = chapter.images.as_slice().to_vec();

    Ok(ReadTemplate {
        viewer,
        notice: None,
        chapter,
        webtoon,
        images,
        comments,
    })
}

/// Post a comment on a chapter.
///
/// Anonymous visitors are sent to the login page and nothing is stored.
/// Otherwise the text is stored as submitted, blank included, and the reader
/// is redirected back to the chapter.
///
/// # Errors
///
/// Returns `AppError::NotFound` if no chapter has this id.
#[instrument(skip(state, viewer, form))]
pub async fn comment(
    State(state): State<AppState>,
    OptionalAuth(viewer): OptionalAuth,
    Path(id): Path<ChapterId>,
    Form(form): Form<CommentForm>,
) -> Result<Redirect> {
    let chapter = load_chapter(&state, id).await?;
    record_read(&state, viewer.as_ref(), &chapter).await?;

    let Some(user) = viewer else {
        return Ok(Redirect::to(LOGIN_PATH));
    };

    let comment = CommentRepository::new(state.pool())
        .create(user.id, chapter.id, &form.comment)
        .await?;
    tracing::info!(comment_id = %comment.id, chapter_id = %chapter.id, user_id = %user.id, "Comment posted");

    Ok(Redirect::to(&format!("/read/{}", chapter.id)))
}

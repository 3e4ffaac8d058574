//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use tracing::instrument;

use crate::db::WebtoonRepository;
use crate::error::Result;
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::models::{User, Webtoon};
use crate::routes::{MessageQuery, Notice};
use crate::state::AppState;

/// Number of titles shown under "Recently viewed".
pub const RECENTLY_VIEWED_LIMIT: i64 = 5;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub viewer: Option<User>,
    pub notice: Option<Notice>,
    /// Every title, most recently added first.
    pub webtoons: Vec<Webtoon>,
    /// The viewer's last-read titles, most recent first. Empty when anonymous.
    pub recently_viewed: Vec<Webtoon>,
}

/// Display the catalog.
#[instrument(skip_all)]
pub async fn home(
    State(state): State<AppState>,
    OptionalAuth(viewer): OptionalAuth,
    Query(query): Query<MessageQuery>,
) -> Result<HomeTemplate> {
    let repo = WebtoonRepository::new(state.pool());
    let webtoons = repo.list_newest_first().await?;

    let recently_viewed = match &viewer {
        Some(user) => repo.recently_viewed(user.id, RECENTLY_VIEWED_LIMIT).await?,
        None => Vec::new(),
    };

    Ok(HomeTemplate {
        viewer,
        notice: query.notice(),
        webtoons,
        recently_viewed,
    })
}

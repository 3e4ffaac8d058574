//! Admin upload route handlers.
//!
//! Only admins reach these handlers; [`RequireAdmin`] sends anonymous visitors
//! to the login page and everyone else home with a notice.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State};
use serde::Deserialize;
use tracing::instrument;

use crate::db::WebtoonRepository;
use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::models::{NewWebtoon, User};
use crate::routes::Notice;
use crate::state::AppState;

/// Upload form data.
#[derive(Debug, Deserialize)]
pub struct UploadForm {
    #[serde(default)]
    pub title: String,
    #[serde(default, alias = "desc")]
    pub description: String,
    #[serde(default)]
    pub cover_url: String,
}

impl From<UploadForm> for NewWebtoon {
    fn from(form: UploadForm) -> Self {
        Self {
            title: form.title.trim().to_string(),
            description: form.description.trim().to_string(),
            cover_image: form.cover_url.trim().to_string(),
        }
    }
}

/// Admin upload template.
#[derive(Template, WebTemplate)]
#[template(path = "admin.html")]
pub struct AdminTemplate {
    pub viewer: Option<User>,
    pub notice: Option<Notice>,
    /// Directory served at `/uploads`, shown as a hint for local covers.
    pub upload_dir: String,
}

impl AdminTemplate {
    fn new(state: &AppState, admin: User, notice: Option<Notice>) -> Self {
        Self {
            viewer: Some(admin),
            notice,
            upload_dir: state.config().upload_dir.display().to_string(),
        }
    }
}

/// Display the upload form.
#[instrument(skip_all)]
pub async fn form(State(state): State<AppState>, RequireAdmin(admin): RequireAdmin) -> AdminTemplate {
    AdminTemplate::new(&state, admin, None)
}

/// Add a webtoon, then show the form again for the next one.
#[instrument(skip_all)]
pub async fn upload(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Form(form): Form<UploadForm>,
) -> Result<AdminTemplate> {
    let webtoon = WebtoonRepository::new(state.pool())
        .create(&NewWebtoon::from(form))
        .await?;

    tracing::info!(webtoon_id = %webtoon.id, user_id = %admin.id, title = %webtoon.title, "Webtoon added");
    add_breadcrumb(
        "admin",
        "Webtoon added",
        Some(&[("webtoon_id", webtoon.id.to_string().as_str())]),
    );

    Ok(AdminTemplate::new(
        &state,
        admin,
        Some(Notice::success("Webtoon added!")),
    ))
}

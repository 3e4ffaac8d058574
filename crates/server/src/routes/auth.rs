//! Sign-in and sign-out route handlers.
//!
//! Sign-in goes through the mock identity provider: any well-formed address is
//! accepted, and the configured admin address is granted admin rights.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::Redirect,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use webtoon_core::Email;

use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{OptionalAuth, clear_current_user, set_current_user};
use crate::models::User;
use crate::routes::{MessageQuery, Notice};
use crate::services::sign_in;
use crate::state::AppState;

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub viewer: Option<User>,
    pub notice: Option<Notice>,
}

/// Display the login page.
pub async fn login_page(
    OptionalAuth(viewer): OptionalAuth,
    Query(query): Query<MessageQuery>,
) -> LoginTemplate {
    LoginTemplate {
        viewer,
        notice: query.notice(),
    }
}

/// Handle login form submission.
///
/// Finds or creates the user for the address exactly as submitted, stores it
/// in the session and redirects home.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Redirect> {
    let email = Email::new(form.email);
    let user = sign_in(state.pool(), state.identity(), &email).await?;
    set_current_user(&session, &user).await?;
    set_sentry_user(&user.id, Some(user.email.as_str()));

    tracing::info!(user_id = %user.id, is_admin = user.is_admin, "User signed in");
    Ok(Redirect::to("/"))
}

/// Handle logout.
///
/// Destroys the whole session and redirects home.
#[instrument(skip_all)]
pub async fn logout(session: Session) -> Redirect {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!("Failed to flush session: {}", e);
    }
    clear_sentry_user();

    Redirect::to("/")
}

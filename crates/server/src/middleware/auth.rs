//! Identity resolution extractors.
//!
//! The session holds only the signed-in user's id. Each extractor loads the
//! user record fresh, so an admin flag refreshed at sign-in applies at once.
//! A missing session, an unknown id or a failed lookup all resolve to
//! anonymous.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::db::UserRepository;
use crate::models::{SessionUser, User, session_keys};
use crate::state::AppState;

/// Where anonymous visitors are sent.
pub const LOGIN_PATH: &str = "/login";

/// Where signed-in non-admins are sent from admin pages.
pub const ADMIN_ONLY_REDIRECT: &str = "/?error=admin_only";

/// Resolve the requesting user, or `None` for anonymous.
async fn resolve_user(parts: &Parts, state: &AppState) -> Option<User> {
    let session = parts.extensions.get::<Session>()?;

    let session_user = match session.get::<SessionUser>(session_keys::CURRENT_USER).await {
        Ok(value) => value?,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read session, treating as anonymous");
            return None;
        }
    };

    match UserRepository::new(state.pool())
        .get_by_id(session_user.id)
        .await
    {
        Ok(user) => user,
        Err(e) => {
            tracing::error!(user_id = %session_user.id, error = %e, "Failed to load session user");
            None
        }
    }
}

/// Rejection for extractors that require a signed-in user.
#[derive(Debug)]
pub enum AuthRejection {
    /// Anonymous: send to the login page.
    RedirectToLogin,
    /// Signed in but not an admin: send home with a notice.
    NotAdmin,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to(LOGIN_PATH).into_response(),
            Self::NotAdmin => Redirect::to(ADMIN_ONLY_REDIRECT).into_response(),
        }
    }
}

/// Extractor that optionally gets the current user.
///
/// Never rejects.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(OptionalAuth(user): OptionalAuth) -> impl IntoResponse {
///     match user {
///         Some(u) => format!("Hello, {}!", u.name),
///         None => "Hello, reader!".to_string(),
///     }
/// }
/// ```
pub struct OptionalAuth(pub Option<User>);

impl FromRequestParts<AppState> for OptionalAuth {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(resolve_user(parts, state).await))
    }
}

/// Extractor that requires a signed-in admin.
pub struct RequireAdmin(pub User);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = resolve_user(parts, state)
            .await
            .ok_or(AuthRejection::RedirectToLogin)?;

        if !user.is_admin {
            tracing::info!(user_id = %user.id, "Non-admin turned away from admin page");
            return Err(AuthRejection::NotAdmin);
        }

        Ok(Self(user))
    }
}

/// Store `user` as the session's identity.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &User,
) -> Result<(), tower_sessions::session::Error> {
    session
        .insert(session_keys::CURRENT_USER, SessionUser { id: user.id })
        .await
}

/// Destroy the session (logout).
///
/// # Errors
///
/// Returns an error if the session store cannot delete the record.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.flush().await
}

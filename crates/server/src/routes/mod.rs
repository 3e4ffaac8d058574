//! HTTP route handlers for the reader.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                 - Catalog, newest first, plus recently viewed
//! GET  /webtoon/{id}     - Webtoon detail with chapter list
//! GET  /read/{id}        - Chapter reader (records history when signed in)
//! POST /read/{id}        - Post a comment
//! GET  /admin            - Upload form (admin only)
//! POST /admin            - Add a webtoon (admin only)
//! POST /contact          - Message the site operator
//! GET  /login            - Sign-in form
//! POST /login            - Sign in with an email address
//! GET  /logout           - Sign out
//! ```
//!
//! Pages show one-shot notices through `?success=` and `?error=` query codes.

pub mod admin;
pub mod auth;
pub mod contact;
pub mod home;
pub mod read;
pub mod webtoons;

use axum::{
    Router,
    routing::{get, post},
};
use serde::Deserialize;

use crate::middleware::form_rate_limiter;
use crate::state::AppState;

// =============================================================================
// Notices
// =============================================================================

/// Query parameters for error/success display.
#[derive(Debug, Default, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// A one-shot message rendered at the top of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// `success` or `error`; used as a CSS modifier.
    pub kind: &'static str,
    pub text: &'static str,
}

impl Notice {
    #[must_use]
    pub const fn success(text: &'static str) -> Self {
        Self {
            kind: "success",
            text,
        }
    }

    #[must_use]
    pub const fn error(text: &'static str) -> Self {
        Self {
            kind: "error",
            text,
        }
    }
}

impl MessageQuery {
    /// Resolve the query codes to a notice. Unknown codes are ignored.
    #[must_use]
    pub fn notice(&self) -> Option<Notice> {
        let error = self.error.as_deref().and_then(|code| match code {
            "admin_only" => Some(Notice::error("Only the site admin can access that page.")),
            _ => None,
        });

        error.or_else(|| {
            self.success.as_deref().and_then(|code| match code {
                "message_sent" => Some(Notice::success("Message sent to the site owner!")),
                _ => None,
            })
        })
    }
}

// =============================================================================
// Router
// =============================================================================

/// Create all page routes for the reader.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/webtoon/{id}", get(webtoons::show))
        .route("/read/{id}", get(read::show).post(read::comment))
        .route("/admin", get(admin::form).post(admin::upload))
        .route("/contact", post(contact::submit).layer(form_rate_limiter()))
        .route(
            "/login",
            get(auth::login_page).merge(post(auth::login).layer(form_rate_limiter())),
        )
        .route("/logout", get(auth::logout))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn query(error: Option<&str>, success: Option<&str>) -> MessageQuery {
        MessageQuery {
            error: error.map(String::from),
            success: success.map(String::from),
        }
    }

    #[test]
    fn test_known_codes_resolve() {
        assert_eq!(
            query(None, Some("message_sent")).notice().map(|n| n.kind),
            Some("success")
        );
        assert_eq!(
            query(Some("admin_only"), None).notice().map(|n| n.kind),
            Some("error")
        );
    }

    #[test]
    fn test_error_wins_over_success() {
        let notice = query(Some("admin_only"), Some("message_sent")).notice().unwrap();
        assert_eq!(notice.kind, "error");
    }

    #[test]
    fn test_unknown_codes_are_ignored() {
        assert!(query(Some("<script>"), Some("whatever")).notice().is_none());
        assert!(MessageQuery::default().notice().is_none());
    }
}

//! Integration test harness for the webtoon reader.
//!
//! [`TestApp`] builds the real router over a private in-memory database and
//! drives it with `tower::ServiceExt::oneshot`. The session cookie is carried
//! between requests, so a test reads like a browser session.
//!
//! ```rust,ignore
//! let mut app = TestApp::new().await;
//! app.login("reader@example.com").await;
//! let page = app.get("/").await;
//! assert_eq!(page.status, StatusCode::OK);
//! ```

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use axum::Router;
use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{HeaderMap, Method, Request, StatusCode};
use sqlx::SqlitePool;
use tower::ServiceExt;

use webtoon_core::{Email, ImageSequence};
use webtoon_server::app;
use webtoon_server::config::ServerConfig;
use webtoon_server::db::{self, ChapterRepository, UserRepository, WebtoonRepository};
use webtoon_server::middleware::{create_session_layer, create_session_store};
use webtoon_server::middleware::session::SESSION_COOKIE_NAME;
use webtoon_server::models::{Chapter, NewChapter, NewWebtoon, User, Webtoon};
use webtoon_server::state::AppState;

/// A response with its body already read.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// The redirect target, if any.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers.get(LOCATION).and_then(|v| v.to_str().ok())
    }

    /// Assert this is a redirect to `target`.
    #[track_caller]
    pub fn assert_redirect(&self, target: &str) {
        assert!(
            self.status.is_redirection(),
            "expected redirect to {target}, got {}",
            self.status
        );
        assert_eq!(self.location(), Some(target));
    }
}

/// The application under test plus a cookie jar of one.
pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    session_cookie: Option<String>,
}

impl TestApp {
    /// Build the app with the local configuration (admin is `admin@gmail.com`).
    pub async fn new() -> Self {
        Self::with_config(ServerConfig::local()).await
    }

    /// Build the app with `config`, ignoring its database URL.
    pub async fn with_config(config: ServerConfig) -> Self {
        let pool = db::create_memory_pool().await.unwrap();
        db::migrate(&pool).await.unwrap();

        let store = create_session_store(&pool).await.unwrap();
        let session_layer = create_session_layer(store, &config);
        let router = app::router(AppState::new(config, pool.clone()), session_layer);

        Self {
            router,
            pool,
            session_cookie: None,
        }
    }

    /// Whether the jar currently holds a session cookie.
    #[must_use]
    pub const fn has_session(&self) -> bool {
        self.session_cookie.is_some()
    }

    pub async fn get(&mut self, uri: &str) -> TestResponse {
        self.send(self.request(Method::GET, uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_form(&mut self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let request = self
            .request(Method::POST, uri)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(encode_form(fields)))
            .unwrap();
        self.send(request).await
    }

    /// Send a prepared request through the router, keeping any new session cookie.
    pub async fn send(&mut self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();

        for value in response.headers().get_all(SET_COOKIE) {
            if let Ok(cookie) = value.to_str() {
                self.store_cookie(cookie);
            }
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    /// Sign in through the login form.
    pub async fn login(&mut self, email: &str) -> TestResponse {
        let response = self.post_form("/login", &[("email", email)]).await;
        response.assert_redirect("/");
        response
    }

    pub async fn logout(&mut self) -> TestResponse {
        self.get("/logout").await
    }

    /// A request builder carrying the session cookie.
    pub fn request(&self, method: Method, uri: &str) -> axum::http::request::Builder {
        let builder = Request::builder().method(method).uri(uri);
        match &self.session_cookie {
            Some(cookie) => builder.header(COOKIE, format!("{SESSION_COOKIE_NAME}={cookie}")),
            None => builder,
        }
    }

    fn store_cookie(&mut self, header: &str) {
        let mut attributes = header.split(';').map(str::trim);
        let Some((name, value)) = attributes.next().and_then(|pair| pair.split_once('=')) else {
            return;
        };
        if name != SESSION_COOKIE_NAME {
            return;
        }

        let removed = value.is_empty()
            || attributes.any(|attr| attr.eq_ignore_ascii_case("Max-Age=0"));
        self.session_cookie = if removed {
            None
        } else {
            Some(value.to_string())
        };
    }

    // -------------------------------------------------------------------------
    // Fixtures
    // -------------------------------------------------------------------------

    pub async fn webtoon(&self, title: &str) -> Webtoon {
        WebtoonRepository::new(&self.pool)
            .create(&NewWebtoon {
                title: title.to_string(),
                description: format!("All about {title}."),
                cover_image: format!("https://img.example.com/{}.png", title.replace(' ', "-")),
            })
            .await
            .unwrap()
    }

    pub async fn chapter(&self, webtoon: &Webtoon, title: &str, images: &[&str]) -> Chapter {
        ChapterRepository::new(&self.pool)
            .create(&NewChapter {
                webtoon_id: webtoon.id,
                title: title.to_string(),
                images: ImageSequence::new(images.iter().map(ToString::to_string).collect())
                    .unwrap(),
            })
            .await
            .unwrap()
    }

    pub async fn user(&self, email: &str) -> Option<User> {
        UserRepository::new(&self.pool)
            .get_by_email(&Email::from(email))
            .await
            .unwrap()
    }

    pub async fn count(&self, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }
}

/// Encode form fields as `application/x-www-form-urlencoded`.
#[must_use]
pub fn encode_form(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

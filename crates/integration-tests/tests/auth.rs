//! Mock sign-in, sign-out and session handling.

use axum::http::StatusCode;
use axum::http::header::SET_COOKIE;
use webtoon_core::Email;
use webtoon_integration_tests::TestApp;
use webtoon_server::config::ServerConfig;

#[tokio::test]
async fn login_page_renders() {
    let mut app = TestApp::new().await;
    let page = app.get("/login").await;

    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("name=\"email\""));
}

#[tokio::test]
async fn first_login_creates_one_user_and_repeat_reuses_it() {
    let mut app = TestApp::new().await;

    app.login("newcomer@example.com").await;
    assert!(app.has_session());
    assert_eq!(app.count("users").await, 1);
    let created = app.user("newcomer@example.com").await.unwrap();
    assert_eq!(created.name, "User");
    assert!(!created.is_admin);

    app.logout().await;
    app.login("newcomer@example.com").await;
    assert_eq!(app.count("users").await, 1);
    assert_eq!(app.user("newcomer@example.com").await.unwrap().id, created.id);
}

#[tokio::test]
async fn address_is_used_exactly_as_submitted() {
    let mut app = TestApp::new().await;

    app.login("Foo@x.com").await;
    app.logout().await;
    app.login("foo@x.com").await;
    app.logout().await;

    assert_eq!(app.count("users").await, 2);
    assert!(app.user("Foo@x.com").await.is_some());
    assert!(app.user("foo@x.com").await.is_some());
}

#[tokio::test]
async fn address_without_at_sign_still_signs_in() {
    let mut app = TestApp::new().await;

    app.login("obito").await;
    assert!(app.has_session());
    assert_eq!(app.user("obito").await.unwrap().name, "User");
}

#[tokio::test]
async fn admin_address_must_match_exactly() {
    let mut app = TestApp::new().await;

    app.login("ADMIN@GMAIL.COM").await;
    assert!(!app.user("ADMIN@GMAIL.COM").await.unwrap().is_admin);
    app.get("/admin").await.assert_redirect("/?error=admin_only");
}

#[tokio::test]
async fn configured_admin_address_gets_admin() {
    let mut app = TestApp::new().await;

    app.login("admin@gmail.com").await;
    assert!(app.user("admin@gmail.com").await.unwrap().is_admin);

    let page = app.get("/").await;
    assert!(page.body.contains("href=\"/admin\""));
}

#[tokio::test]
async fn admin_address_is_configurable() {
    let config = ServerConfig {
        admin_email: Email::from("editor@webtoons.example"),
        ..ServerConfig::local()
    };
    let mut app = TestApp::with_config(config).await;

    app.login("admin@gmail.com").await;
    assert!(!app.user("admin@gmail.com").await.unwrap().is_admin);

    app.logout().await;
    app.login("editor@webtoons.example").await;
    assert!(app.user("editor@webtoons.example").await.unwrap().is_admin);
}

#[tokio::test]
async fn session_cookie_lasts_for_the_browser_session() {
    let mut app = TestApp::new().await;
    let response = app.login("reader@example.com").await;

    let cookie = response
        .headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("webtoon_session="))
        .unwrap()
        .to_ascii_lowercase();
    assert!(!cookie.contains("max-age"), "{cookie}");
    assert!(!cookie.contains("expires"), "{cookie}");
    assert!(cookie.contains("httponly"));
}

#[tokio::test]
async fn logout_ends_the_session() {
    let mut app = TestApp::new().await;
    app.login("admin@gmail.com").await;
    assert_eq!(app.get("/admin").await.status, StatusCode::OK);

    let response = app.logout().await;
    response.assert_redirect("/");

    app.get("/admin").await.assert_redirect("/login");
}

#[tokio::test]
async fn stale_session_cookie_is_anonymous() {
    let mut app = TestApp::new().await;
    app.login("reader@example.com").await;

    sqlx::query("DELETE FROM users")
        .execute(&app.pool)
        .await
        .unwrap();

    let page = app.get("/").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("href=\"/login\""));
}

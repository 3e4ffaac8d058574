//! Operational endpoints and the shared middleware stack.

use axum::http::StatusCode;
use webtoon_integration_tests::TestApp;

#[tokio::test]
async fn health_returns_ok() {
    let mut app = TestApp::new().await;
    let response = app.get("/health").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "ok");
}

#[tokio::test]
async fn readiness_checks_database() {
    let mut app = TestApp::new().await;
    assert_eq!(app.get("/health/ready").await.status, StatusCode::OK);

    app.pool.close().await;
    assert_eq!(
        app.get("/health/ready").await.status,
        StatusCode::SERVICE_UNAVAILABLE
    );
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let mut app = TestApp::new().await;
    let response = app.get("/this-route-does-not-exist").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn responses_carry_request_id() {
    let mut app = TestApp::new().await;
    let response = app.get("/health").await;

    let request_id = response
        .headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert_eq!(request_id.len(), 36, "expected a UUID, got {request_id:?}");
}

#[tokio::test]
async fn upstream_request_id_is_echoed() {
    let mut app = TestApp::new().await;
    let request = app
        .request(axum::http::Method::GET, "/health")
        .header("x-request-id", "edge-42")
        .body(axum::body::Body::empty())
        .unwrap();

    let response = app.send(request).await;
    assert_eq!(
        response.headers.get("x-request-id").unwrap().to_str().unwrap(),
        "edge-42"
    );
}

#[tokio::test]
async fn pages_carry_security_headers() {
    let mut app = TestApp::new().await;
    let response = app.get("/").await;

    assert_eq!(response.headers.get("x-frame-options").unwrap(), "DENY");
    assert_eq!(
        response.headers.get("x-content-type-options").unwrap(),
        "nosniff"
    );
    let csp = response
        .headers
        .get("content-security-policy")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(csp.contains("img-src 'self' https:"));
}

//! Reading history and comments.

use axum::http::StatusCode;
use webtoon_integration_tests::TestApp;
use webtoon_server::db::HistoryRepository;

#[tokio::test]
async fn second_read_updates_history_in_place() {
    let mut app = TestApp::new().await;
    let webtoon = app.webtoon("Reread").await;
    let first_chapter = app.chapter(&webtoon, "Ep 1", &["1.png"]).await;
    let second_chapter = app.chapter(&webtoon, "Ep 2", &["2.png"]).await;
    app.login("reader@example.com").await;
    let user = app.user("reader@example.com").await.unwrap();
    let pool = app.pool.clone();
    let history = HistoryRepository::new(&pool);

    app.get(&format!("/read/{}", first_chapter.id)).await;
    let first = history.get(user.id, webtoon.id).await.unwrap().unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    app.get(&format!("/read/{}", second_chapter.id)).await;
    let second = history.get(user.id, webtoon.id).await.unwrap().unwrap();

    assert_eq!(history.count(user.id, webtoon.id).await.unwrap(), 1);
    assert_eq!(first.id, second.id);
    assert!(second.last_read > first.last_read);
}

#[tokio::test]
async fn recently_viewed_keeps_five_most_recent() {
    let mut app = TestApp::new().await;
    app.login("reader@example.com").await;

    let titles = ["Alpha", "Bravo", "Charlie", "Delta", "Echo", "Foxtrot"];
    for title in titles {
        let webtoon = app.webtoon(title).await;
        let chapter = app.chapter(&webtoon, "Ep", &["p.png"]).await;
        app.get(&format!("/read/{}", chapter.id)).await;
    }

    let page = app.get("/").await;
    let (recent, _) = page
        .body
        .split_once("Recently added")
        .expect("home page has both shelves");

    assert_eq!(recent.matches("card card-small").count(), 5);
    assert!(!recent.contains("Alpha"));
    let foxtrot = recent.find("Foxtrot").unwrap();
    let bravo = recent.find("Bravo").unwrap();
    assert!(foxtrot < bravo);
}

#[tokio::test]
async fn anonymous_comment_redirects_to_login() {
    let mut app = TestApp::new().await;
    let webtoon = app.webtoon("Quiet").await;
    let chapter = app.chapter(&webtoon, "Ep", &["p.png"]).await;

    let response = app
        .post_form(&format!("/read/{}", chapter.id), &[("comment", "first!")])
        .await;

    response.assert_redirect("/login");
    let stored: Vec<String> = sqlx::query_scalar("SELECT content FROM comments ORDER BY id")
        .fetch_all(&app.pool)
        .await
        .unwrap();
    assert_eq!(stored, ["   ", ""]);
}

#[tokio::test]
async fn signed_in_comment_is_stored_and_shown() {
    let mut app = TestApp::new().await;
    let webtoon = app.webtoon("Chatty").await;
    let chapter = app.chapter(&webtoon, "Ep", &["p.png"]).await;
    app.login("reader@example.com").await;

    let path = format!("/read/{}", chapter.id);
    let response = app
        .post_form(&path, &[("comment", "  Loved the last panel  ")])
        .await;
    response.assert_redirect(&path);
    assert_eq!(app.count("comments").await, 1);

    let page = app.get(&path).await;
    assert!(page.body.contains("Loved the last panel"));
    assert!(page.body.contains("<strong>User</strong>"));
}

#[tokio::test]
async fn blank_comment_is_stored_as_submitted() {
    let mut app = TestApp::new().await;
    let webtoon = app.webtoon("Silent").await;
    let chapter = app.chapter(&webtoon, "Ep", &["p.png"]).await;
    app.login("reader@example.com").await;

    let path = format!("/read/{}", chapter.id);
    app.post_form(&path, &[("comment", "   ")])
        .await
        .assert_redirect(&path);
    app.post_form(&path, &[]).await.assert_redirect(&path);

    assert_eq!(app.count("comments").await, 0);
}

#[tokio::test]
async fn comments_listed_oldest_first() {
    let mut app = TestApp::new().await;
    let webtoon = app.webtoon("Thread").await;
    let chapter = app.chapter(&webtoon, "Ep", &["p.png"]).await;
    app.login("reader@example.com").await;

    let path = format!("/read/{}", chapter.id);
    app.post_form(&path, &[("comment", "comment number one")]).await;
    app.post_form(&path, &[("comment", "comment number two")]).await;

    let page = app.get(&path).await;
    let one = page.body.find("comment number one").unwrap();
    let two = page.body.find("comment number two").unwrap();
    assert!(one < two);
}

#[tokio::test]
async fn non_numeric_chapter_id_is_rejected() {
    let mut app = TestApp::new().await;
    let response = app.get("/read/not-a-number").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.count("history").await, 0);
}

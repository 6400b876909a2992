mod support;

use notes_api::config::Backend;
use serde_json::{json, Value};
use support::{initial_notes, TestApp, FIRST_NOTE};

fn assert_json(response: &reqwest::Response) {
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(
        content_type.contains("application/json"),
        "unexpected content-type: {content_type}"
    );
}

#[tokio::test]
async fn test_notes_are_returned_as_json() {
    let app = TestApp::spawn(Backend::Loro).await;

    let response = app.client.get(app.url("/api/notes")).send().await.unwrap();
    assert_eq!(response.status(), 200);
    assert_json(&response);

    app.teardown().await;
}

#[tokio::test]
async fn test_there_are_two_notes() {
    let app = TestApp::spawn(Backend::Loro).await;

    assert_eq!(app.get_notes().await.len(), initial_notes().len());

    app.teardown().await;
}

#[tokio::test]
async fn test_first_note_is_about_midudev() {
    let app = TestApp::spawn(Backend::Loro).await;

    let notes = app.get_notes().await;
    assert_eq!(notes[0]["content"], FIRST_NOTE);

    app.teardown().await;
}

#[tokio::test]
async fn test_contents_include_midudev_note() {
    let app = TestApp::spawn(Backend::Loro).await;

    assert!(app.contents().await.contains(&FIRST_NOTE.to_string()));

    app.teardown().await;
}

#[tokio::test]
async fn test_valid_note_can_be_added() {
    let app = TestApp::spawn(Backend::Loro).await;

    let response = app
        .client
        .post(app.url("/api/notes"))
        .json(&json!({ "content": "proximamente async/await", "important": true }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert_json(&response);

    let created: Value = response.json().await.unwrap();
    assert_eq!(created["content"], "proximamente async/await");
    assert_eq!(created["important"], true);
    assert!(created["id"].is_string());

    let contents = app.contents().await;
    assert_eq!(contents.len(), initial_notes().len() + 1);
    assert!(contents.contains(&"proximamente async/await".to_string()));

    app.teardown().await;
}

#[tokio::test]
async fn test_important_defaults_to_false() {
    let app = TestApp::spawn(Backend::Loro).await;

    let response = app
        .client
        .post(app.url("/api/notes"))
        .json(&json!({ "content": "no flag given" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let created: Value = response.json().await.unwrap();
    assert_eq!(created["important"], false);

    app.teardown().await;
}

#[tokio::test]
async fn test_note_without_content_is_not_added() {
    let app = TestApp::spawn(Backend::Loro).await;

    let response = app
        .client
        .post(app.url("/api/notes"))
        .json(&json!({ "important": true }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    assert_json(&response);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("content"));

    assert_eq!(app.get_notes().await.len(), initial_notes().len());

    app.teardown().await;
}

#[tokio::test]
async fn test_note_with_blank_content_is_not_added() {
    let app = TestApp::spawn(Backend::Loro).await;

    let response = app
        .client
        .post(app.url("/api/notes"))
        .json(&json!({ "content": "   ", "important": false }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    assert_eq!(app.get_notes().await.len(), initial_notes().len());

    app.teardown().await;
}

#[tokio::test]
async fn test_note_can_be_deleted() {
    let app = TestApp::spawn(Backend::Loro).await;

    let notes = app.get_notes().await;
    let note_to_delete = &notes[0];
    let id = note_to_delete["id"].as_str().unwrap();

    let response = app
        .client
        .delete(app.url(&format!("/api/notes/{}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 204);
    assert!(response.bytes().await.unwrap().is_empty());

    let remaining = app.get_notes().await;
    assert_eq!(remaining.len(), initial_notes().len() - 1);
    assert_ne!(remaining[0]["content"], note_to_delete["content"]);

    app.teardown().await;
}

#[tokio::test]
async fn test_malformed_id_cannot_be_deleted() {
    let app = TestApp::spawn(Backend::Loro).await;

    let response = app
        .client
        .delete(app.url("/api/notes/1234534"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    assert_json(&response);

    assert_eq!(app.get_notes().await.len(), initial_notes().len());

    app.teardown().await;
}

#[tokio::test]
async fn test_absent_well_formed_id_is_not_found() {
    let app = TestApp::spawn(Backend::Loro).await;

    let response = app
        .client
        .delete(app.url("/api/notes/00000000-0000-4000-8000-000000000000"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
    assert_json(&response);

    assert_eq!(app.get_notes().await.len(), initial_notes().len());

    app.teardown().await;
}

#[tokio::test]
async fn test_repeated_list_is_stable() {
    let app = TestApp::spawn(Backend::Loro).await;

    let first = app.get_notes().await;
    let second = app.get_notes().await;
    assert_eq!(first, second);

    app.teardown().await;
}

#[tokio::test]
async fn test_single_note_can_be_fetched() {
    let app = TestApp::spawn(Backend::Loro).await;

    let notes = app.get_notes().await;
    let id = notes[1]["id"].as_str().unwrap();

    let response = app
        .client
        .get(app.url(&format!("/api/notes/{}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let note: Value = response.json().await.unwrap();
    assert_eq!(note, notes[1]);

    let response = app
        .client
        .get(app.url("/api/notes/1234534"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    app.teardown().await;
}

#[tokio::test]
async fn test_absent_note_cannot_be_fetched() {
    let app = TestApp::spawn(Backend::Loro).await;

    let response = app
        .client
        .get(app.url("/api/notes/00000000-0000-4000-8000-000000000000"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
    assert_json(&response);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].is_string());

    app.teardown().await;
}

#[tokio::test]
async fn test_unsupported_method_is_json_405() {
    let app = TestApp::spawn(Backend::Loro).await;

    let response = app.client.put(app.url("/api/notes")).send().await.unwrap();
    assert_eq!(response.status(), 405);
    assert_json(&response);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "method not allowed");

    app.teardown().await;
}

#[tokio::test]
async fn test_unknown_endpoint_is_json_404() {
    let app = TestApp::spawn(Backend::Loro).await;

    let response = app.client.get(app.url("/api/unknown")).send().await.unwrap();
    assert_eq!(response.status(), 404);
    assert_json(&response);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "unknown endpoint");

    app.teardown().await;
}

#[tokio::test]
async fn test_sqlite_backend_honours_same_contract() {
    let app = TestApp::spawn(Backend::Sqlite).await;

    let notes = app.get_notes().await;
    assert_eq!(notes.len(), initial_notes().len());
    assert_eq!(notes[0]["content"], FIRST_NOTE);

    let response = app
        .client
        .post(app.url("/api/notes"))
        .json(&json!({ "important": true }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    let id = notes[0]["id"].as_str().unwrap();
    let response = app
        .client
        .delete(app.url(&format!("/api/notes/{}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 204);

    let response = app
        .client
        .delete(app.url("/api/notes/1234534"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    assert_eq!(app.get_notes().await.len(), initial_notes().len() - 1);

    app.teardown().await;
}

#[tokio::test]
async fn test_shutdown_releases_listener() {
    let app = TestApp::spawn(Backend::Loro).await;
    let addr = app.handle.local_addr();

    assert_eq!(app.get_notes().await.len(), initial_notes().len());
    app.teardown().await;

    assert!(tokio::net::TcpStream::connect(addr).await.is_err());
}

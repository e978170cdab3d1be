use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use recordstore::{Dataset, FileRecordStore, InMemoryRecordStore, Value};
use record_server::{router, types::ApiMessage, AppState};
use tower::ServiceExt;

const CSV: &str = "age,glucose\n30,90\n41,130\n52,101\n";

fn file_app(dir: &tempfile::TempDir, contents: Option<&str>) -> (Router, std::path::PathBuf) {
    let path = dir.path().join("diabetes.csv");
    if let Some(text) = contents {
        std::fs::write(&path, text).unwrap();
    }
    let state = Arc::new(AppState::new(FileRecordStore::new(&path)));
    (router(state), path)
}

fn post_json(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/update-csv")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn message(resp: axum::response::Response) -> String {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice::<ApiMessage>(&bytes).unwrap().message
}

#[tokio::test]
async fn test_append_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let (app, path) = file_app(&dir, Some(CSV));

    let resp = app.oneshot(post_json(r#"{"age":45,"glucose":120}"#)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(message(resp).await, "CSV updated successfully");

    let text = std::fs::read_to_string(&path).unwrap();
    let ds = Dataset::parse(&text).unwrap();
    assert_eq!(ds.len(), 4);
    assert_eq!(text.lines().last(), Some("45,120"));
}

#[tokio::test]
async fn test_append_form_strings_kept_as_sent() {
    let dir = tempfile::tempdir().unwrap();
    let (app, path) = file_app(&dir, Some(CSV));

    let resp = app.oneshot(post_json(r#"{"age":"45","glucose":"120"}"#)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let ds = Dataset::parse(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let last = ds.rows().last().unwrap();
    assert_eq!(last.get("age"), Some(&Value::Number(45.0)));
    assert_eq!(last.get("glucose"), Some(&Value::Number(120.0)));
}

#[tokio::test]
async fn test_append_missing_file_is_500_read() {
    let dir = tempfile::tempdir().unwrap();
    let (app, path) = file_app(&dir, None);

    let resp = app.oneshot(post_json(r#"{"age":45}"#)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(message(resp).await, "Error reading CSV file");
    assert!(!path.exists());
}

#[tokio::test]
async fn test_append_write_failure_is_500_write() {
    let dir = tempfile::tempdir().unwrap();
    let (app, path) = file_app(&dir, Some(CSV));
    std::fs::create_dir(FileRecordStore::new(&path).tmp_path()).unwrap();

    let resp = app.oneshot(post_json(r#"{"age":45}"#)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(message(resp).await, "Error writing CSV file");
    assert_eq!(std::fs::read_to_string(&path).unwrap(), CSV);
}

#[tokio::test]
async fn test_non_object_body_rejected() {
    let state = Arc::new(AppState::new(InMemoryRecordStore::new(CSV)));
    let resp = router(state).oneshot(post_json("[1,2,3]")).await.unwrap();
    assert!(resp.status().is_client_error());
}

#[tokio::test]
async fn test_get_csv_serves_current_contents() {
    let state = Arc::new(AppState::new(InMemoryRecordStore::new(CSV)));
    let app = router(state);

    let resp = app
        .clone()
        .oneshot(post_json(r#"{"age":45,"glucose":120}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .oneshot(Request::builder().uri("/diabetes.csv").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/csv; charset=utf-8"
    );
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"age,glucose\n30,90\n41,130\n52,101\n45,120\n");
}

#[tokio::test]
async fn test_get_csv_missing_is_500() {
    let state = Arc::new(AppState::new(InMemoryRecordStore::missing()));
    let resp = router(state)
        .oneshot(Request::builder().uri("/diabetes.csv").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(message(resp).await, "Error reading CSV file");
}

#[tokio::test]
async fn test_concurrent_appends_are_not_lost() {
    let state = Arc::new(AppState::new(InMemoryRecordStore::new(CSV)));
    let app = router(state.clone());

    let mut handles = Vec::new();
    for i in 0..20 {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            let body = format!(r#"{{"age":{},"glucose":100}}"#, 60 + i);
            app.oneshot(post_json(&body)).await.unwrap().status()
        }));
    }
    for h in handles {
        assert_eq!(h.await.unwrap(), StatusCode::OK);
    }

    let resp = app
        .oneshot(Request::builder().uri("/diabetes.csv").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let ds = Dataset::parse(std::str::from_utf8(&bytes).unwrap()).unwrap();
    assert_eq!(ds.len(), 23);
}

#[tokio::test]
async fn test_health() {
    let state = Arc::new(AppState::new(InMemoryRecordStore::missing()));
    let resp = router(state)
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let v: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(v["status"], "ok");
}

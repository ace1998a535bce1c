#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
//! Firebase backend against a mock HTTP server

use std::sync::{Arc, Mutex};

use bytes::Bytes;
use huddle_storage::{
    FirebaseStorage, ObjectKey, ObjectStore, ProgressCallback, StorageError, TransferProgress,
};
use serde_json::json;
use wiremock::matchers::{header, method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BUCKET: &str = "demo.appspot.com";

fn storage(server: &MockServer) -> FirebaseStorage {
    FirebaseStorage::new(BUCKET, Some("id-token".to_string()))
        .unwrap()
        .with_endpoint(format!("{}/v0", server.uri()))
        .with_chunk_size(1024)
        .with_max_retries(0)
}

fn recorder() -> (ProgressCallback, Arc<Mutex<Vec<TransferProgress>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let cb: ProgressCallback = Arc::new(move |p| sink.lock().unwrap().push(p));
    (cb, seen)
}

#[tokio::test]
async fn upload_streams_body_and_reports_progress() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/v0/b/{BUCKET}/o")))
        .and(query_param("name", "discord/serverImage/cat.png"))
        .and(header("authorization", "Firebase id-token"))
        .and(header("content-type", "image/png"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "discord/serverImage/cat.png",
            "size": "4096",
            "contentType": "image/png",
            "downloadTokens": "tok-1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = storage(&server);
    let key = ObjectKey::new("discord", "serverImage", "cat.png");
    let (cb, seen) = recorder();

    let stored = store
        .put_object(&key, Bytes::from(vec![1_u8; 4096]), "image/png", cb)
        .await
        .unwrap();

    assert_eq!(stored.size, 4096);
    assert_eq!(stored.content_type, "image/png");

    let seen = seen.lock().unwrap();
    let percents: Vec<u8> = seen.iter().map(TransferProgress::percent).collect();
    assert_eq!(percents, vec![25, 50, 75, 100]);
    assert!(seen.iter().all(|p| p.total_bytes == 4096));
}

#[tokio::test]
async fn download_url_uses_first_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/v0/b/demo\.appspot\.com/o/discord.+cat\.png$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "discord/serverImage/cat.png",
            "downloadTokens": "tok-1,tok-2"
        })))
        .mount(&server)
        .await;

    let store = storage(&server);
    let key = ObjectKey::new("discord", "serverImage", "cat.png");
    let url = store.download_url(&key).await.unwrap();

    assert_eq!(
        url,
        format!(
            "{}/v0/b/{BUCKET}/o/discord%2FserverImage%2Fcat.png?alt=media&token=tok-1",
            server.uri()
        )
    );
}

#[tokio::test]
async fn rejected_upload_maps_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": { "code": 403, "message": "Permission denied." }
        })))
        .mount(&server)
        .await;

    let store = storage(&server);
    let key = ObjectKey::new("discord", "serverImage", "cat.png");
    let (cb, _) = recorder();
    let err = store
        .put_object(&key, Bytes::from_static(b"png"), "image/png", cb)
        .await
        .unwrap_err();

    assert!(matches!(err, StorageError::PermissionDenied { .. }));
    assert!(err.is_expected());
}

#[tokio::test]
async fn server_errors_are_network_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .expect(1)
        .mount(&server)
        .await;

    let store = storage(&server);
    let key = ObjectKey::new("discord", "serverImage", "cat.png");
    let (cb, _) = recorder();
    let err = store
        .put_object(&key, Bytes::from_static(b"png"), "image/png", cb)
        .await
        .unwrap_err();

    assert!(err.is_retryable());
}

#[tokio::test]
async fn missing_token_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "discord/serverImage/cat.png"
        })))
        .mount(&server)
        .await;

    let store = storage(&server);
    let key = ObjectKey::new("discord", "serverImage", "cat.png");
    assert!(matches!(
        store.download_url(&key).await,
        Err(StorageError::ObjectNotFound { .. })
    ));
}

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! `HttpBackendApi` against a mock HTTP server.

use std::time::Duration;

use huddle_app::adapters::HttpBackendApi;
use huddle_core::error::CoreError;
use huddle_core::traits::BackendApi;
use huddle_core::types::{HttpMethod, MutationRequest};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api(server: &MockServer) -> HttpBackendApi {
    HttpBackendApi::new(server.uri(), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn posts_json_with_query() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/channels"))
        .and(query_param("serverId", "s1"))
        .and(body_json(json!({"name": "lounge", "type": "TEXT"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "s1"})))
        .expect(1)
        .mount(&server)
        .await;

    let request = MutationRequest::new(HttpMethod::Post, "/api/channels")
        .with_query("serverId", "s1")
        .with_body(json!({"name": "lounge", "type": "TEXT"}));
    let response = api(&server).send(&request).await.unwrap();
    assert_eq!(response, json!({"id": "s1"}));
}

#[tokio::test]
async fn sends_bearer_token_and_handles_empty_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/servers/s1"))
        .and(header("authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let api = api(&server).with_auth_token(Some("secret".to_string()));
    let response = api
        .send(&MutationRequest::new(HttpMethod::Delete, "/api/servers/s1"))
        .await
        .unwrap();
    assert_eq!(response, serde_json::Value::Null);
}

#[tokio::test]
async fn error_status_becomes_submission_error() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;

    let err = api(&server)
        .send(&MutationRequest::new(HttpMethod::Patch, "/api/servers/s1").with_body(json!({})))
        .await
        .unwrap_err();
    match err {
        CoreError::Submission { status, message } => {
            assert_eq!(status, Some(401));
            assert_eq!(message, "Unauthorized");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn json_error_message_is_extracted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "Server ID missing"})),
        )
        .mount(&server)
        .await;

    let err = api(&server)
        .send(&MutationRequest::new(HttpMethod::Post, "/api/channels"))
        .await
        .unwrap_err();
    assert!(err.is_expected());
    assert_eq!(err.to_string(), "Submission failed (HTTP 400): Server ID missing");
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    let api = HttpBackendApi::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
    let err = api
        .send(&MutationRequest::new(HttpMethod::Post, "/api/servers"))
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::NetworkError(_)));
}

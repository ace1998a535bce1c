//! `BackendApi` over HTTP (reqwest)

use std::time::Duration;

use async_trait::async_trait;
use huddle_core::error::{CoreError, CoreResult};
use huddle_core::traits::BackendApi;
use huddle_core::types::{HttpMethod, MutationRequest};
use huddle_storage::{mask_token, truncate_for_log};
use reqwest::{Client, Method};
use serde::Deserialize;

/// Sends modal mutations to the chat backend.
pub struct HttpBackendApi {
    client: Client,
    base_url: String,
    auth_token: Option<String>,
}

/// Error bodies come as `{"error": "..."}`, `{"message": "..."}` or plain text.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(alias = "message")]
    error: String,
}

impl HttpBackendApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> CoreResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(timeout)
            .build()
            .map_err(|e| CoreError::NetworkError(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth_token: None,
        })
    }

    #[must_use]
    pub fn with_auth_token(mut self, token: Option<String>) -> Self {
        self.auth_token = token;
        self
    }

    /// Absolute URLs pass through; paths are joined onto the base URL.
    fn resolve(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    fn method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Post => Method::POST,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
        }
    }
}

#[async_trait]
impl BackendApi for HttpBackendApi {
    async fn send(&self, request: &MutationRequest) -> CoreResult<serde_json::Value> {
        let url = self.resolve(&request.path);
        log::debug!("[backend] {} {url}", request.method);

        let mut rb = self
            .client
            .request(Self::method(request.method), &url)
            .query(&request.query);
        if let Some(body) = &request.body {
            rb = rb.json(body);
        }
        if let Some(token) = &self.auth_token {
            log::debug!("[backend] using auth token {}", mask_token(token));
            rb = rb.bearer_auth(token);
        }

        let response = rb.send().await.map_err(|e| {
            log::error!("[backend] {} {url} failed: {e}", request.method);
            CoreError::NetworkError(e.to_string())
        })?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| CoreError::NetworkError(format!("failed to read response: {e}")))?;
        log::debug!("[backend] HTTP {}: {}", status.as_u16(), truncate_for_log(&text));

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&text)
                .map(|b| b.error)
                .unwrap_or_else(|_| {
                    if text.trim().is_empty() {
                        status.canonical_reason().unwrap_or("request failed").to_string()
                    } else {
                        truncate_for_log(text.trim())
                    }
                });
            return Err(CoreError::Submission {
                status: Some(status.as_u16()),
                message,
            });
        }

        if text.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        Ok(serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text)))
    }
}

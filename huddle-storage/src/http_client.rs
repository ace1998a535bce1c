//! Generic HTTP helpers shared by the HTTP-based backends
//!
//! Each backend builds its own `RequestBuilder` (auth headers and URL layout
//! differ); this module owns sending, logging and status classification.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::StorageError;
use crate::utils::log_sanitizer::truncate_for_log;

/// HTTP helper functions
pub struct HttpUtils;

impl HttpUtils {
    /// Send a request and return `(status_code, body)`.
    ///
    /// Transport failures become `NetworkError`/`Timeout`, HTTP 429 becomes
    /// `RateLimited` and 502–504 become `NetworkError`. Every other status is
    /// returned to the caller for backend-specific mapping.
    pub async fn execute_request(
        request_builder: RequestBuilder,
        backend_name: &str,
        method_name: &str,
        url: &str,
    ) -> Result<(u16, String), StorageError> {
        log::debug!("[{backend_name}] {method_name} {url}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                StorageError::Timeout {
                    backend: backend_name.to_string(),
                    detail: e.to_string(),
                }
            } else {
                StorageError::NetworkError {
                    backend: backend_name.to_string(),
                    detail: e.to_string(),
                }
            }
        })?;

        let status_code = response.status().as_u16();
        log::debug!("[{backend_name}] Response Status: {status_code}");

        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        if status_code == 429 {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{backend_name}] Rate limited (HTTP 429), retry_after={retry_after:?}");
            return Err(StorageError::RateLimited {
                backend: backend_name.to_string(),
                retry_after,
                raw_message: Some(body),
            });
        }

        if matches!(status_code, 502..=504) {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{backend_name}] Server error (HTTP {status_code})");
            return Err(StorageError::NetworkError {
                backend: backend_name.to_string(),
                detail: format!("HTTP {status_code}: {}", truncate_for_log(&body)),
            });
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| StorageError::NetworkError {
                backend: backend_name.to_string(),
                detail: format!("Failed to read response body: {e}"),
            })?;

        log::debug!(
            "[{backend_name}] Response Body: {}",
            truncate_for_log(&response_text)
        );

        Ok((status_code, response_text))
    }

    /// Parse a JSON body into `T`.
    pub fn parse_json<T>(response_text: &str, backend_name: &str) -> Result<T, StorageError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("[{backend_name}] JSON parse failed: {e}");
            log::error!(
                "[{backend_name}] Raw response: {}",
                truncate_for_log(response_text)
            );
            StorageError::ParseError {
                backend: backend_name.to_string(),
                detail: e.to_string(),
            }
        })
    }

    /// Like [`execute_request`](Self::execute_request) but retries transient failures.
    ///
    /// Only for idempotent requests. Requests with a streaming body cannot be
    /// cloned and fall back to a single attempt.
    ///
    /// Backoff: 100ms, 200ms, 400ms, ... capped at 10s; a `Retry-After` hint
    /// (capped at 30s) takes precedence.
    pub async fn execute_request_with_retry(
        request_builder: RequestBuilder,
        backend_name: &str,
        method_name: &str,
        url: &str,
        max_retries: u32,
    ) -> Result<(u16, String), StorageError> {
        if max_retries == 0 {
            return Self::execute_request(request_builder, backend_name, method_name, url).await;
        }

        let mut last_error = None;

        for attempt in 0..=max_retries {
            let Some(req) = request_builder.try_clone() else {
                log::warn!("[{backend_name}] Cannot clone request, disabling retry");
                return Self::execute_request(request_builder, backend_name, method_name, url)
                    .await;
            };

            match Self::execute_request(req, backend_name, method_name, url).await {
                Ok(resp) => return Ok(resp),
                Err(e) if attempt < max_retries && e.is_retryable() => {
                    let delay = retry_delay(&e, attempt);
                    log::warn!(
                        "[{}] Request failed (attempt {}/{}), retrying in {:.1}s: {}",
                        backend_name,
                        attempt + 1,
                        max_retries,
                        delay.as_secs_f32(),
                        e
                    );
                    tokio::time::sleep(delay).await;
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| StorageError::NetworkError {
            backend: backend_name.to_string(),
            detail: "All retries exhausted with no error captured".to_string(),
        }))
    }
}

fn retry_delay(error: &StorageError, attempt: u32) -> Duration {
    if let StorageError::RateLimited {
        retry_after: Some(secs),
        ..
    } = error
    {
        Duration::from_secs((*secs).min(30))
    } else {
        backoff_delay(attempt)
    }
}

fn backoff_delay(attempt: u32) -> Duration {
    let capped_attempt = attempt.min(20);
    let delay_ms = 100_u64.saturating_mul(1_u64 << capped_attempt);
    Duration::from_millis(delay_ms.min(10_000))
}

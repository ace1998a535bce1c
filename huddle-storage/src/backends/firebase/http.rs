//! Firebase HTTP request methods

use bytes::Bytes;
use reqwest::RequestBuilder;
use reqwest::header::{AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE};

use crate::backends::common::progress_body;
use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::traits::{RawApiError, StorageErrorMapper};
use crate::types::{ObjectKey, ProgressCallback};
use crate::utils::log_sanitizer::mask_token;

use super::{FirebaseErrorResponse, FirebaseObject, FirebaseStorage};

impl FirebaseStorage {
    /// `{base}/b/{bucket}/o/{encoded path}`; slashes in the path are encoded.
    pub(crate) fn object_url(&self, key: &ObjectKey) -> String {
        format!(
            "{}/b/{}/o/{}",
            self.base_url,
            self.bucket,
            urlencoding::encode(&key.path())
        )
    }

    pub(crate) fn upload_url(&self, key: &ObjectKey) -> String {
        format!(
            "{}/b/{}/o?name={}",
            self.base_url,
            self.bucket,
            urlencoding::encode(&key.path())
        )
    }

    fn authorize(&self, rb: RequestBuilder) -> RequestBuilder {
        match &self.auth_token {
            Some(token) => {
                log::debug!("[firebase] using auth token {}", mask_token(token));
                rb.header(AUTHORIZATION, format!("Firebase {token}"))
            }
            None => rb,
        }
    }

    /// Map a non-2xx response to a `StorageError`.
    fn check_status(&self, status: u16, body: &str, key: &ObjectKey) -> Result<()> {
        if (200..300).contains(&status) {
            return Ok(());
        }
        let message = match serde_json::from_str::<FirebaseErrorResponse>(body) {
            Ok(envelope) if envelope.error.code != status => {
                format!("{} (reported code {})", envelope.error.message, envelope.error.code)
            }
            Ok(envelope) => envelope.error.message,
            Err(_) => body.to_string(),
        };
        log::error!("[firebase] HTTP {status} for {key}: {message}");
        Err(self.map_error(RawApiError::with_code(status.to_string(), message), key))
    }

    /// Stream `data` to the bucket. Single attempt.
    pub(crate) async fn upload(
        &self,
        key: &ObjectKey,
        data: Bytes,
        content_type: &str,
        on_progress: ProgressCallback,
    ) -> Result<FirebaseObject> {
        let url = self.upload_url(key);
        let len = data.len();
        let body = progress_body(data, self.chunk_size, on_progress);
        let rb = self
            .authorize(self.client.post(&url))
            .header(CONTENT_TYPE, content_type)
            .header(CONTENT_LENGTH, len)
            .body(body);

        let (status, text) =
            HttpUtils::execute_request(rb, self.backend_name(), "POST", &url).await?;
        self.check_status(status, &text, key)?;
        HttpUtils::parse_json(&text, self.backend_name())
    }

    /// Fetch object metadata (retried on transient failures).
    pub(crate) async fn get_metadata(&self, key: &ObjectKey) -> Result<FirebaseObject> {
        let url = self.object_url(key);
        let rb = self.authorize(self.client.get(&url));
        let (status, text) = HttpUtils::execute_request_with_retry(
            rb,
            self.backend_name(),
            "GET",
            &url,
            self.max_retries,
        )
        .await?;
        self.check_status(status, &text, key)?;
        HttpUtils::parse_json(&text, self.backend_name())
    }
}

//! Firebase Cloud Storage backend
//!
//! Uses the REST surface the web SDK talks to:
//! - upload: `POST {base}/b/{bucket}/o?name={path}` with the raw body
//! - metadata: `GET {base}/b/{bucket}/o/{path}`
//! - download: `{base}/b/{bucket}/o/{path}?alt=media&token={downloadToken}`

mod error;
mod http;
mod store;
mod types;

use reqwest::Client;

use crate::backends::common::{UPLOAD_CHUNK_SIZE, create_http_client};
use crate::error::{Result, StorageError};

pub(crate) use types::{FirebaseErrorResponse, FirebaseObject};

pub(crate) const FIREBASE_API_BASE: &str = "https://firebasestorage.googleapis.com/v0";

/// Firebase Cloud Storage backend
pub struct FirebaseStorage {
    pub(crate) client: Client,
    pub(crate) bucket: String,
    pub(crate) auth_token: Option<String>,
    pub(crate) base_url: String,
    pub(crate) max_retries: u32,
    pub(crate) chunk_size: usize,
}

impl FirebaseStorage {
    pub fn new(bucket: impl Into<String>, auth_token: Option<String>) -> Result<Self> {
        let bucket = bucket.into();
        if bucket.trim().is_empty() {
            return Err(StorageError::InvalidParameter {
                backend: "firebase".to_string(),
                param: "bucket".to_string(),
                detail: "bucket name cannot be empty".to_string(),
            });
        }
        Ok(Self {
            client: create_http_client("firebase")?,
            bucket,
            auth_token,
            base_url: FIREBASE_API_BASE.to_string(),
            max_retries: 2,
            chunk_size: UPLOAD_CHUNK_SIZE,
        })
    }

    /// Point at an emulator or a mock server instead of the public endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.base_url = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    /// Retries for metadata reads (uploads are never retried).
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Slice size for streamed uploads; one progress callback per slice.
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

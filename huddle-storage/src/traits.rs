use async_trait::async_trait;
use bytes::Bytes;

use crate::error::{Result, StorageError};
use crate::types::{ObjectKey, ProgressCallback, StoredObject};

/// Raw backend error (internal)
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// HTTP status or backend error code
    pub code: Option<String>,
    /// Original message
    pub message: String,
}

impl RawApiError {
    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// Maps raw backend failures onto [`StorageError`] (internal).
pub(crate) trait StorageErrorMapper {
    /// Backend identifier
    fn backend_name(&self) -> &'static str;

    /// Map a raw error, `key` is the object the request targeted.
    fn map_error(&self, raw: RawApiError, key: &ObjectKey) -> StorageError;

    fn unknown_error(&self, raw: RawApiError) -> StorageError {
        StorageError::Unknown {
            backend: self.backend_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// Object storage backend.
///
/// Implementations stream an object to the bucket and resolve the public address
/// it can be downloaded from once the write has completed.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Backend identifier
    fn id(&self) -> &'static str;

    /// Write `data` under `key`, overwriting any existing object.
    ///
    /// `on_progress` is called as bytes are handed to the transport; values are
    /// non-decreasing within one call.
    async fn put_object(
        &self,
        key: &ObjectKey,
        data: Bytes,
        content_type: &str,
        on_progress: ProgressCallback,
    ) -> Result<StoredObject>;

    /// Public download URL of an existing object.
    async fn download_url(&self, key: &ObjectKey) -> Result<String>;
}

//! Firebase `ObjectStore` implementation

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::Result;
use crate::traits::{ObjectStore, RawApiError, StorageErrorMapper};
use crate::types::{ObjectKey, ProgressCallback, StoredObject};

use super::FirebaseStorage;

#[async_trait]
impl ObjectStore for FirebaseStorage {
    fn id(&self) -> &'static str {
        "firebase"
    }

    async fn put_object(
        &self,
        key: &ObjectKey,
        data: Bytes,
        content_type: &str,
        on_progress: ProgressCallback,
    ) -> Result<StoredObject> {
        let len = data.len() as u64;
        let object = self.upload(key, data, content_type, on_progress).await?;
        log::info!("[firebase] stored {} ({len} bytes)", object.name);

        Ok(StoredObject {
            key: key.clone(),
            size: object.size_bytes().unwrap_or(len),
            content_type: object
                .content_type
                .unwrap_or_else(|| content_type.to_string()),
        })
    }

    async fn download_url(&self, key: &ObjectKey) -> Result<String> {
        let object = self.get_metadata(key).await?;
        let Some(token) = object.first_download_token() else {
            return Err(self.map_error(
                RawApiError::with_code("404", "object has no download token"),
                key,
            ));
        };
        Ok(format!(
            "{}?alt=media&token={}",
            self.object_url(key),
            urlencoding::encode(token)
        ))
    }
}

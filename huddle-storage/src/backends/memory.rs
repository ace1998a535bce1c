//! In-memory backend
//!
//! Objects live for the lifetime of the store. Progress is reported per slice
//! with a scheduler yield in between, so observers see the same incremental
//! sequence a network upload produces.

use std::collections::HashMap;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::RwLock;

use crate::backends::common::{UPLOAD_CHUNK_SIZE, split_chunks};
use crate::error::{Result, StorageError};
use crate::traits::ObjectStore;
use crate::types::{ObjectKey, ProgressCallback, StoredObject, TransferProgress};

#[derive(Debug, Clone)]
struct Blob {
    data: Bytes,
    content_type: String,
}

/// Process-local object store
pub struct MemoryStore {
    base_url: String,
    chunk_size: usize,
    objects: RwLock<HashMap<String, Blob>>,
}

impl MemoryStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            chunk_size: UPLOAD_CHUNK_SIZE,
            objects: RwLock::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Bytes and content type of a stored object.
    pub async fn get(&self, key: &ObjectKey) -> Option<(Bytes, String)> {
        self.objects
            .read()
            .await
            .get(&key.path())
            .map(|b| (b.data.clone(), b.content_type.clone()))
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    fn id(&self) -> &'static str {
        "memory"
    }

    async fn put_object(
        &self,
        key: &ObjectKey,
        data: Bytes,
        content_type: &str,
        on_progress: ProgressCallback,
    ) -> Result<StoredObject> {
        if key.file_name.is_empty() {
            return Err(StorageError::InvalidParameter {
                backend: self.id().to_string(),
                param: "file_name".to_string(),
                detail: "object name cannot be empty".to_string(),
            });
        }

        let total = data.len() as u64;
        let mut sent = 0_u64;
        for chunk in split_chunks(&data, self.chunk_size) {
            sent += chunk.len() as u64;
            on_progress(TransferProgress::new(sent, total));
            tokio::task::yield_now().await;
        }

        let path = key.path();
        let replaced = self
            .objects
            .write()
            .await
            .insert(
                path.clone(),
                Blob {
                    data,
                    content_type: content_type.to_string(),
                },
            )
            .is_some();
        if replaced {
            log::debug!("[memory] overwrote {path}");
        }

        Ok(StoredObject {
            key: key.clone(),
            size: total,
            content_type: content_type.to_string(),
        })
    }

    async fn download_url(&self, key: &ObjectKey) -> Result<String> {
        let path = key.path();
        if self.objects.read().await.contains_key(&path) {
            Ok(format!("{}/{}", self.base_url, path))
        } else {
            Err(StorageError::ObjectNotFound {
                backend: self.id().to_string(),
                key: path,
                raw_message: None,
            })
        }
    }
}

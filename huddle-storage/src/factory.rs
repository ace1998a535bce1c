//! Storage factory.

use std::sync::Arc;

use crate::backends::MemoryStore;
use crate::error::Result;
use crate::traits::ObjectStore;
use crate::types::StorageCredentials;

#[cfg(feature = "firebase")]
use crate::backends::FirebaseStorage;

/// Creates an [`ObjectStore`] from the given settings.
///
/// # Examples
///
/// ```rust,no_run
/// use huddle_storage::{create_store, StorageCredentials};
///
/// let store = create_store(StorageCredentials::Memory {
///     base_url: "memory://huddle".to_string(),
/// }).unwrap();
/// assert_eq!(store.id(), "memory");
/// ```
pub fn create_store(credentials: StorageCredentials) -> Result<Arc<dyn ObjectStore>> {
    match credentials {
        #[cfg(feature = "firebase")]
        StorageCredentials::Firebase {
            bucket,
            auth_token,
            endpoint,
            max_retries,
        } => {
            let mut store = FirebaseStorage::new(bucket, auth_token)?.with_max_retries(max_retries);
            if let Some(endpoint) = endpoint {
                store = store.with_endpoint(endpoint);
            }
            Ok(Arc::new(store))
        }
        StorageCredentials::Memory { base_url } => Ok(Arc::new(MemoryStore::new(base_url))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;

    #[test]
    fn builds_memory_store() {
        let store = create_store(StorageCredentials::Memory {
            base_url: "memory://x".into(),
        })
        .unwrap();
        assert_eq!(store.id(), "memory");
    }

    #[cfg(feature = "firebase")]
    #[test]
    fn rejects_empty_bucket() {
        let res = create_store(StorageCredentials::Firebase {
            bucket: "  ".into(),
            auth_token: None,
            endpoint: None,
            max_retries: 0,
        });
        assert!(matches!(res, Err(StorageError::InvalidParameter { .. })));
    }
}

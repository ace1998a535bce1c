//! Storage types shared by every backend.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Storage backend identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackendType {
    /// Firebase Cloud Storage (REST API).
    Firebase,
    /// Process-local store, for development and tests.
    Memory,
}

impl StorageBackendType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Firebase => "firebase",
            Self::Memory => "memory",
        }
    }
}

impl fmt::Display for StorageBackendType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Connection settings for a storage backend.
///
/// The variant decides which backend [`create_store`](crate::create_store) builds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend")]
pub enum StorageCredentials {
    /// Firebase Cloud Storage. Requires feature `firebase`.
    #[cfg(feature = "firebase")]
    #[serde(rename = "firebase")]
    Firebase {
        /// Bucket name, e.g. `my-app.appspot.com`.
        bucket: String,
        /// Firebase ID token sent as `Authorization: Firebase <token>`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        auth_token: Option<String>,
        /// API base override (emulator or tests). Defaults to the public endpoint.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        endpoint: Option<String>,
        /// Retries for idempotent metadata reads.
        #[serde(default = "default_max_retries")]
        max_retries: u32,
    },

    /// In-memory store; objects live as long as the process.
    #[serde(rename = "memory")]
    Memory {
        /// Prefix used to build public URLs for stored objects.
        #[serde(default = "default_memory_base_url")]
        base_url: String,
    },
}

fn default_max_retries() -> u32 {
    2
}

fn default_memory_base_url() -> String {
    "memory://huddle".to_string()
}

impl StorageCredentials {
    /// Backend this configuration builds.
    #[must_use]
    pub fn backend_type(&self) -> StorageBackendType {
        match self {
            #[cfg(feature = "firebase")]
            Self::Firebase { .. } => StorageBackendType::Firebase,
            Self::Memory { .. } => StorageBackendType::Memory,
        }
    }
}

/// Deterministic object location: `<namespace>/<category>/<file_name>`.
///
/// Two uploads with the same file name under the same category map to the same
/// key; the later write wins.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectKey {
    pub namespace: String,
    pub category: String,
    pub file_name: String,
}

impl ObjectKey {
    pub fn new(
        namespace: impl Into<String>,
        category: impl Into<String>,
        file_name: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            category: category.into(),
            file_name: file_name.into(),
        }
    }

    /// Slash-joined object path without a leading slash.
    #[must_use]
    pub fn path(&self) -> String {
        [
            self.namespace.trim_matches('/'),
            self.category.trim_matches('/'),
            self.file_name.as_str(),
        ]
        .iter()
        .filter(|segment| !segment.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("/")
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Snapshot of an in-flight transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferProgress {
    pub bytes_transferred: u64,
    pub total_bytes: u64,
}

impl TransferProgress {
    pub fn new(bytes_transferred: u64, total_bytes: u64) -> Self {
        Self {
            bytes_transferred,
            total_bytes,
        }
    }

    /// `bytes_transferred / total_bytes` as a rounded percentage in `0..=100`.
    ///
    /// An empty object counts as complete.
    #[must_use]
    pub fn percent(&self) -> u8 {
        if self.total_bytes == 0 {
            return 100;
        }
        let done = u128::from(self.bytes_transferred.min(self.total_bytes));
        let total = u128::from(self.total_bytes);
        let pct = (done * 100 + total / 2) / total;
        u8::try_from(pct).unwrap_or(100)
    }
}

/// Progress listener handed to [`ObjectStore::put_object`](crate::ObjectStore::put_object).
pub type ProgressCallback = Arc<dyn Fn(TransferProgress) + Send + Sync>;

/// Metadata of an object after a completed write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredObject {
    pub key: ObjectKey,
    pub size: u64,
    pub content_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_path_joins_segments() {
        let key = ObjectKey::new("discord", "serverImage", "cat.png");
        assert_eq!(key.path(), "discord/serverImage/cat.png");
        assert_eq!(key.to_string(), "discord/serverImage/cat.png");
    }

    #[test]
    fn key_path_strips_stray_slashes() {
        let key = ObjectKey::new("/discord/", "serverImage/", "cat.png");
        assert_eq!(key.path(), "discord/serverImage/cat.png");
    }

    #[test]
    fn key_path_skips_empty_category() {
        let key = ObjectKey::new("discord", "", "cat.png");
        assert_eq!(key.path(), "discord/cat.png");
    }

    #[test]
    fn percent_rounds_to_nearest() {
        assert_eq!(TransferProgress::new(0, 200).percent(), 0);
        assert_eq!(TransferProgress::new(1, 200).percent(), 1); // 0.5 rounds up
        assert_eq!(TransferProgress::new(333, 1000).percent(), 33);
        assert_eq!(TransferProgress::new(335, 1000).percent(), 34);
        assert_eq!(TransferProgress::new(1000, 1000).percent(), 100);
    }

    #[test]
    fn percent_clamps_and_handles_empty() {
        assert_eq!(TransferProgress::new(5, 0).percent(), 100);
        assert_eq!(TransferProgress::new(2000, 1000).percent(), 100);
        assert_eq!(TransferProgress::new(u64::MAX, u64::MAX).percent(), 100);
    }

    #[test]
    fn credentials_deserialize_by_backend_tag() {
        let creds: StorageCredentials =
            serde_json::from_str(r#"{"backend":"memory"}"#).unwrap();
        assert_eq!(
            creds,
            StorageCredentials::Memory {
                base_url: "memory://huddle".to_string()
            }
        );
        assert_eq!(creds.backend_type(), StorageBackendType::Memory);
    }

    #[cfg(feature = "firebase")]
    #[test]
    fn firebase_credentials_defaults() {
        let creds: StorageCredentials =
            serde_json::from_str(r#"{"backend":"firebase","bucket":"demo.appspot.com"}"#)
                .unwrap();
        let StorageCredentials::Firebase {
            bucket,
            auth_token,
            endpoint,
            max_retries,
        } = creds
        else {
            panic!("expected firebase credentials");
        };
        assert_eq!(bucket, "demo.appspot.com");
        assert!(auth_token.is_none());
        assert!(endpoint.is_none());
        assert_eq!(max_retries, 2);
    }
}

//! # huddle-storage
//!
//! Object storage abstraction used by Huddle to upload server images and
//! message attachments.
//!
//! ## Backends
//!
//! | Backend | Feature Flag | Notes |
//! |---------|-------------|-------|
//! | Firebase Cloud Storage | `firebase` | REST upload with download-token URLs |
//! | In-memory | always | Development and tests |
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use huddle_storage::{create_store, ObjectKey, StorageCredentials, TransferProgress};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = create_store(StorageCredentials::Memory {
//!         base_url: "memory://huddle".to_string(),
//!     })?;
//!
//!     let key = ObjectKey::new("discord", "serverImage", "cat.png");
//!     let on_progress = Arc::new(|p: TransferProgress| println!("{}%", p.percent()));
//!     store
//!         .put_object(&key, bytes::Bytes::from_static(b"..."), "image/png", on_progress)
//!         .await?;
//!     println!("{}", store.download_url(&key).await?);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`Result<T, StorageError>`](StorageError).
//! Writes are single-attempt; callers decide whether to retry.

mod backends;
mod error;
mod factory;
mod http_client;
mod traits;
mod types;
mod utils;

pub use error::{Result, StorageError};

pub use factory::create_store;

pub use traits::ObjectStore;

pub use types::{
    ObjectKey, ProgressCallback, StorageBackendType, StorageCredentials, StoredObject,
    TransferProgress,
};

#[cfg(feature = "firebase")]
pub use backends::FirebaseStorage;
pub use backends::MemoryStore;

pub use utils::log_sanitizer::{mask_token, truncate_for_log};

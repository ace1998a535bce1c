//! Storage backend implementations

/// Shared utilities used by backend implementations.
pub mod common;

#[cfg(feature = "firebase")]
mod firebase;
mod memory;

#[cfg(feature = "firebase")]
pub use firebase::FirebaseStorage;
pub use memory::MemoryStore;

//! Backend shared helpers

use std::time::Duration;

use bytes::Bytes;
use reqwest::{Body, Client};

use crate::error::{Result, StorageError};
use crate::types::{ProgressCallback, TransferProgress};

/// Connect timeout (seconds)
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Whole-request timeout (seconds); large uploads need headroom
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Size of the slices a body is streamed in; one progress callback per slice.
pub const UPLOAD_CHUNK_SIZE: usize = 64 * 1024;

/// Build an HTTP client with timeouts.
pub fn create_http_client(backend: &str) -> Result<Client> {
    Client::builder()
        .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
        .build()
        .map_err(|e| StorageError::NetworkError {
            backend: backend.to_string(),
            detail: format!("Failed to create HTTP client: {e}"),
        })
}

/// Split `data` into cheap `Bytes` slices of at most `chunk_size`.
pub fn split_chunks(data: &Bytes, chunk_size: usize) -> Vec<Bytes> {
    let chunk_size = chunk_size.max(1);
    (0..data.len())
        .step_by(chunk_size)
        .map(|start| data.slice(start..(start + chunk_size).min(data.len())))
        .collect()
}

/// Wrap `data` in a streaming body that reports progress per slice.
///
/// Progress is counted when a slice is handed to the transport, so the final
/// callback (100%) fires before the server has answered.
pub fn progress_body(data: Bytes, chunk_size: usize, on_progress: ProgressCallback) -> Body {
    let total = data.len() as u64;
    let mut sent = 0_u64;
    let chunks = split_chunks(&data, chunk_size);
    let stream = futures::stream::iter(chunks.into_iter().map(move |chunk| {
        sent += chunk.len() as u64;
        on_progress(TransferProgress::new(sent, total));
        Ok::<Bytes, std::io::Error>(chunk)
    }));
    Body::wrap_stream(stream)
}

//! Backend mutation endpoint abstract Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::MutationRequest;

/// Backend API used by modal forms
///
/// Platform implementation:
/// - `huddle-app`: `HttpBackendApi` (reqwest)
#[async_trait]
pub trait BackendApi: Send + Sync {
    /// Send one mutation and return the decoded JSON response.
    ///
    /// Non-2xx responses map to `CoreError::Submission` with the HTTP status,
    /// transport failures to `CoreError::NetworkError`.
    ///
    /// # Arguments
    /// * `request` - Method, path, query and JSON body
    async fn send(&self, request: &MutationRequest) -> CoreResult<serde_json::Value>;
}

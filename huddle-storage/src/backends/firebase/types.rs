//! Firebase Storage wire types

use serde::Deserialize;

/// Object resource returned by upload and metadata requests.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirebaseObject {
    pub name: String,
    /// Sent as a decimal string.
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
    /// Comma-separated list; the first token is used for download URLs.
    #[serde(default)]
    pub download_tokens: Option<String>,
}

impl FirebaseObject {
    pub fn first_download_token(&self) -> Option<&str> {
        self.download_tokens
            .as_deref()
            .and_then(|tokens| tokens.split(',').map(str::trim).find(|t| !t.is_empty()))
    }

    pub fn size_bytes(&self) -> Option<u64> {
        self.size.as_deref().and_then(|s| s.parse().ok())
    }
}

/// Error envelope: `{"error": {"code": 403, "message": "..."}}`
#[derive(Debug, Deserialize)]
pub struct FirebaseErrorResponse {
    pub error: FirebaseErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct FirebaseErrorBody {
    pub code: u16,
    pub message: String,
}

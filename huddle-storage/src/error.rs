use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for all object storage operations.
///
/// Each variant includes a `backend` field identifying which storage backend
/// produced the error. All variants are serializable for structured error reporting.
///
/// # Retryable Errors
///
/// - [`NetworkError`](Self::NetworkError): connectivity issue
/// - [`Timeout`](Self::Timeout): request timed out
/// - [`RateLimited`](Self::RateLimited): backend throttled the request
///
/// Uploads are never retried automatically; only idempotent metadata reads
/// (download URL resolution) go through the retrying HTTP path.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum StorageError {
    /// A network-level error occurred (DNS resolution failure, connection reset, etc.).
    #[error("[{backend}] Network error: {detail}")]
    NetworkError {
        /// Backend that produced the error.
        backend: String,
        /// Error details.
        detail: String,
    },

    /// The request timed out.
    #[error("[{backend}] Request timed out: {detail}")]
    Timeout {
        /// Backend that produced the error.
        backend: String,
        /// Error details.
        detail: String,
    },

    /// The auth token is missing, invalid or expired.
    #[error("[{backend}] Unauthorized{}", fmt_raw(.raw_message.as_deref()))]
    Unauthorized {
        /// Backend that produced the error.
        backend: String,
        /// Original error message from the backend, if available.
        raw_message: Option<String>,
    },

    /// The caller may not write or read the requested object (bucket rules).
    #[error("[{backend}] Permission denied{}", fmt_raw(.raw_message.as_deref()))]
    PermissionDenied {
        /// Backend that produced the error.
        backend: String,
        /// Original error message from the backend, if available.
        raw_message: Option<String>,
    },

    /// The object does not exist.
    #[error("[{backend}] Object not found: {key}")]
    ObjectNotFound {
        /// Backend that produced the error.
        backend: String,
        /// Full object path.
        key: String,
        /// Original error message from the backend, if available.
        raw_message: Option<String>,
    },

    /// Bucket quota or object size limit exceeded.
    #[error("[{backend}] Quota exceeded{}", fmt_raw(.raw_message.as_deref()))]
    QuotaExceeded {
        /// Backend that produced the error.
        backend: String,
        /// Original error message from the backend, if available.
        raw_message: Option<String>,
    },

    /// Too many requests (HTTP 429).
    #[error("[{backend}] Rate limited{}", fmt_retry_after(.retry_after.as_ref()))]
    RateLimited {
        /// Backend that produced the error.
        backend: String,
        /// Suggested wait time in seconds, if provided.
        retry_after: Option<u64>,
        /// Original error message from the backend, if available.
        raw_message: Option<String>,
    },

    /// A request parameter is invalid (empty bucket, empty file name, ...).
    #[error("[{backend}] Invalid parameter '{param}': {detail}")]
    InvalidParameter {
        /// Backend that produced the error.
        backend: String,
        /// Name of the invalid parameter.
        param: String,
        /// Description of what's wrong.
        detail: String,
    },

    /// Failed to parse the backend's response.
    #[error("[{backend}] Failed to parse response: {detail}")]
    ParseError {
        /// Backend that produced the error.
        backend: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// An unrecognized error from the backend.
    #[error("[{backend}] Unknown error{}: {raw_message}", fmt_code(.raw_code.as_deref()))]
    Unknown {
        /// Backend that produced the error.
        backend: String,
        /// Raw error code (usually the HTTP status), if available.
        raw_code: Option<String>,
        /// Raw error message.
        raw_message: String,
    },
}

fn fmt_raw(raw: Option<&str>) -> String {
    raw.map(|m| format!(": {m}")).unwrap_or_default()
}

fn fmt_code(code: Option<&str>) -> String {
    code.map(|c| format!(" ({c})")).unwrap_or_default()
}

fn fmt_retry_after(retry_after: Option<&u64>) -> String {
    retry_after
        .map(|s| format!(" (retry after {s}s)"))
        .unwrap_or_default()
}

impl StorageError {
    /// Whether this is expected behaviour (bad input, missing object, denied by rules).
    ///
    /// `true` should be logged at `warn`, `false` at `error`.
    /// **Keep this in sync when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized { .. }
                | Self::PermissionDenied { .. }
                | Self::ObjectNotFound { .. }
                | Self::QuotaExceeded { .. }
                | Self::InvalidParameter { .. }
        )
    }

    /// Whether a repeated request could succeed without any change by the user.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::NetworkError { .. } | Self::Timeout { .. } | Self::RateLimited { .. }
        )
    }

    /// Backend identifier carried by every variant.
    #[must_use]
    pub fn backend(&self) -> &str {
        match self {
            Self::NetworkError { backend, .. }
            | Self::Timeout { backend, .. }
            | Self::Unauthorized { backend, .. }
            | Self::PermissionDenied { backend, .. }
            | Self::ObjectNotFound { backend, .. }
            | Self::QuotaExceeded { backend, .. }
            | Self::RateLimited { backend, .. }
            | Self::InvalidParameter { backend, .. }
            | Self::ParseError { backend, .. }
            | Self::Unknown { backend, .. } => backend,
        }
    }
}

/// Storage layer Result type alias
pub type Result<T> = std::result::Result<T, StorageError>;

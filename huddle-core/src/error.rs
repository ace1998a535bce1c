//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use huddle_storage::StorageError;

use crate::types::ModalKind;

/// User-facing error category.
///
/// Every failure is scoped to one modal instance and recoverable by the user:
/// re-select a file (`Validation`), retry the upload (`Upload`) or retry the
/// submit (`Submission`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    Validation,
    Upload,
    Submission,
    Internal,
}

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Dropped file is not in the modal's accept list
    #[error("Unsupported file type '{mime_type}' for {file_name} (accepted: {accepted})")]
    UnsupportedFileType {
        file_name: String,
        mime_type: String,
        accepted: String,
    },

    /// Form or input validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// A new file was dropped while the current one is still uploading
    #[error("An upload is already in progress")]
    UploadInProgress,

    /// Object storage rejected or failed the transfer
    #[error("Upload failed: {0}")]
    Upload(#[from] StorageError),

    /// Local preview could not be produced
    #[error("Preview error: {0}")]
    PreviewError(String),

    /// Backend mutation rejected
    #[error("Submission failed{}: {message}", fmt_status(.status.as_ref()))]
    Submission { status: Option<u16>, message: String },

    /// Another submit of the open modal has not finished yet
    #[error("A submission is already in progress")]
    SubmissionInProgress,

    /// Submit attempted for a modal the controller does not report as open
    #[error("Modal is not open: {0}")]
    ModalNotOpen(ModalKind),

    /// Network error talking to the backend
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

fn fmt_status(status: Option<&u16>) -> String {
    status.map(|s| format!(" (HTTP {s})")).unwrap_or_default()
}

impl CoreError {
    /// Category shown to the user.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedFileType { .. }
            | Self::ValidationError(_)
            | Self::UploadInProgress
            | Self::PreviewError(_)
            | Self::ModalNotOpen(_) => ErrorKind::Validation,
            Self::Upload(_) => ErrorKind::Upload,
            Self::Submission { .. } | Self::SubmissionInProgress | Self::NetworkError(_) => {
                ErrorKind::Submission
            }
            Self::SerializationError(_) | Self::ConfigError(_) => ErrorKind::Internal,
        }
    }

    /// Whether it is expected behaviour (user input, missing resource, ...); used for log levels.
    ///
    /// `true` → `warn`, `false` → `error`.
    /// **Update this method when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::UnsupportedFileType { .. }
            | Self::ValidationError(_)
            | Self::UploadInProgress
            | Self::SubmissionInProgress
            | Self::ModalNotOpen(_) => true,
            Self::Submission { status, .. } => status.is_some_and(|s| (400..500).contains(&s)),
            Self::Upload(e) => e.is_expected(),
            _ => false,
        }
    }

    /// Log at `warn` or `error` depending on [`is_expected`](Self::is_expected).
    pub fn log(&self, context: &str) {
        if self.is_expected() {
            log::warn!("{context}: {self}");
        } else {
            log::error!("{context}: {self}");
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy() {
        let unsupported = CoreError::UnsupportedFileType {
            file_name: "notes.txt".into(),
            mime_type: "text/plain".into(),
            accepted: "image/*".into(),
        };
        assert_eq!(unsupported.kind(), ErrorKind::Validation);
        assert!(unsupported.is_expected());

        let upload = CoreError::from(StorageError::NetworkError {
            backend: "memory".into(),
            detail: "reset".into(),
        });
        assert_eq!(upload.kind(), ErrorKind::Upload);
        assert!(!upload.is_expected());

        let rejected = CoreError::Submission {
            status: Some(422),
            message: "name taken".into(),
        };
        assert_eq!(rejected.kind(), ErrorKind::Submission);
        assert!(rejected.is_expected());

        let server_side = CoreError::Submission {
            status: Some(500),
            message: "Internal Error".into(),
        };
        assert!(!server_side.is_expected());
    }

    #[test]
    fn submission_display() {
        let e = CoreError::Submission {
            status: Some(400),
            message: "Name missing".into(),
        };
        assert_eq!(e.to_string(), "Submission failed (HTTP 400): Name missing");

        let e = CoreError::Submission {
            status: None,
            message: "connection refused".into(),
        };
        assert_eq!(e.to_string(), "Submission failed: connection refused");
    }

    #[test]
    fn serializes_tagged() {
        let json = serde_json::to_value(CoreError::UploadInProgress).unwrap();
        assert_eq!(json["code"], "UploadInProgress");
    }
}

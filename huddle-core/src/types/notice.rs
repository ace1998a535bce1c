//! Toast notifications

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, ErrorKind};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn from_error(err: &CoreError) -> Self {
        let title = match err.kind() {
            ErrorKind::Validation => "Invalid input",
            ErrorKind::Upload => "Upload failed",
            ErrorKind::Submission => "Something went wrong",
            ErrorKind::Internal => "Unexpected error",
        };
        Self::error(title, err.to_string())
    }
}

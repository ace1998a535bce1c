//! Upload-related types

use std::fmt;
use std::path::Path;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

use super::modal::ModalKind;

/// Upload session status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum UploadStatus {
    /// No file held
    #[default]
    Idle,
    /// File accepted, previous preview released
    Validating,
    /// Local preview being produced
    Previewing,
    /// Preview shown, waiting for upload
    Ready,
    Uploading,
    Uploaded,
    /// Last transfer failed; retry is allowed
    Failed,
}

impl UploadStatus {
    /// Status that will change without user input.
    pub fn is_busy(self) -> bool {
        matches!(self, Self::Validating | Self::Previewing | Self::Uploading)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Previewing => "previewing",
            Self::Ready => "ready",
            Self::Uploading => "uploading",
            Self::Uploaded => "uploaded",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for UploadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const PDF_MIME: &str = "application/pdf";

/// Which files a dropzone accepts
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum AcceptPolicy {
    /// `image/*`
    Images,
    /// `image/*` and `application/pdf`
    ImagesAndPdf,
}

impl AcceptPolicy {
    /// Policy for a modal's dropzone, `None` when the modal has none.
    pub fn for_modal(kind: ModalKind) -> Option<Self> {
        match kind {
            ModalKind::CreateServer | ModalKind::EditServer => Some(Self::Images),
            ModalKind::MessageFile => Some(Self::ImagesAndPdf),
            ModalKind::DeleteServer | ModalKind::CreateChannel => None,
        }
    }

    /// MIME parameters (`; charset=...`) and case are ignored.
    pub fn allows(self, mime_type: &str) -> bool {
        let essence = mime_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        let is_image = essence
            .strip_prefix("image/")
            .is_some_and(|sub| !sub.is_empty());
        match self {
            Self::Images => is_image,
            Self::ImagesAndPdf => is_image || essence == PDF_MIME,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Images => "image/*",
            Self::ImagesAndPdf => "image/*, application/pdf",
        }
    }
}

/// A file handed to a dropzone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub name: String,
    pub mime_type: String,
    pub data: Bytes,
}

impl CandidateFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Read a file from disk, guessing its MIME type from the extension.
    pub async fn from_path(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| CoreError::ValidationError(format!("Invalid file path: {}", path.display())))?
            .to_string();
        let data = tokio::fs::read(path).await.map_err(|e| {
            CoreError::ValidationError(format!("Cannot read {}: {e}", path.display()))
        })?;
        let mime_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Ok(Self::new(name, mime_type, data))
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn is_image(&self) -> bool {
        self.mime_type
            .trim_start()
            .get(..6)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("image/"))
    }
}

/// Where uploads land in the bucket: `{namespace}/{category}/{file name}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UploadSettings {
    pub namespace: String,
    pub server_image_category: String,
    pub attachment_category: String,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            namespace: "discord".to_string(),
            server_image_category: "serverImage".to_string(),
            attachment_category: "serverImage".to_string(),
        }
    }
}

impl UploadSettings {
    pub fn category_for(&self, kind: ModalKind) -> &str {
        match kind {
            ModalKind::MessageFile => &self.attachment_category,
            _ => &self.server_image_category,
        }
    }
}

/// Result of a call to `UploadSession::upload`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Transfer finished, download URL attached
    Uploaded(String),
    /// Session already held a result; nothing was transferred
    AlreadyUploaded(String),
    /// Another call is transferring the same file
    InFlight,
    /// No file held
    NoFile,
    /// The session was reset while transferring; the result was dropped
    Discarded,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn images_policy() {
        let p = AcceptPolicy::Images;
        assert!(p.allows("image/png"));
        assert!(p.allows("IMAGE/JPEG"));
        assert!(p.allows("image/svg+xml; charset=utf-8"));
        assert!(!p.allows("image/"));
        assert!(!p.allows("application/pdf"));
        assert!(!p.allows("text/plain"));
        assert!(!p.allows(""));
    }

    #[test]
    fn attachment_policy_adds_pdf() {
        let p = AcceptPolicy::ImagesAndPdf;
        assert!(p.allows("image/webp"));
        assert!(p.allows("application/pdf"));
        assert!(!p.allows("application/zip"));
    }

    #[test]
    fn policy_per_modal() {
        assert_eq!(
            AcceptPolicy::for_modal(ModalKind::CreateServer),
            Some(AcceptPolicy::Images)
        );
        assert_eq!(
            AcceptPolicy::for_modal(ModalKind::MessageFile),
            Some(AcceptPolicy::ImagesAndPdf)
        );
        assert_eq!(AcceptPolicy::for_modal(ModalKind::DeleteServer), None);
    }

    #[test]
    fn busy_states() {
        assert!(UploadStatus::Uploading.is_busy());
        assert!(UploadStatus::Previewing.is_busy());
        assert!(!UploadStatus::Failed.is_busy());
        assert!(!UploadStatus::Uploaded.is_busy());
    }

    #[tokio::test]
    async fn from_path_guesses_mime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("banner.jpg");
        tokio::fs::write(&path, b"\xff\xd8\xff").await.unwrap();

        let file = CandidateFile::from_path(&path).await.unwrap();
        assert_eq!(file.name, "banner.jpg");
        assert_eq!(file.mime_type, "image/jpeg");
        assert_eq!(file.size(), 3);
    }

    #[tokio::test]
    async fn from_path_missing_file() {
        let err = CandidateFile::from_path("/nonexistent/huddle/a.png")
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
    }
}

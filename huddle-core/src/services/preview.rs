//! Dropzone previews

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{CoreError, CoreResult};
use crate::types::CandidateFile;

/// What the dropzone shows
#[derive(Debug, Default)]
pub enum Preview {
    #[default]
    None,
    /// Rendered from the locally held file; released on drop
    Local(PreviewHandle),
    /// Already-uploaded resource (edit flows)
    Remote(String),
}

impl Preview {
    /// Source usable by an `<img>`-like renderer.
    pub fn src(&self) -> Option<&str> {
        match self {
            Self::None => None,
            Self::Local(handle) => Some(handle.src()),
            Self::Remote(url) => Some(url),
        }
    }
}

/// Tracks how many local previews are alive.
#[derive(Debug, Clone, Default)]
pub struct PreviewRegistry {
    live: Arc<AtomicUsize>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_count(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    /// Encode the file into a `data:` URL off the async executor.
    pub async fn render(&self, file: &CandidateFile) -> CoreResult<PreviewHandle> {
        let data = file.data.clone();
        let mime = file.mime_type.clone();
        let src = tokio::task::spawn_blocking(move || {
            format!("data:{mime};base64,{}", STANDARD.encode(&data))
        })
        .await
        .map_err(|e| CoreError::PreviewError(format!("{}: {e}", file.name)))?;

        self.live.fetch_add(1, Ordering::SeqCst);
        let handle = PreviewHandle {
            id: uuid::Uuid::new_v4(),
            src,
            live: Arc::clone(&self.live),
        };
        log::debug!("preview {} created for {}", handle.id, file.name);
        Ok(handle)
    }
}

/// A rendered local preview. Dropping it releases the preview.
pub struct PreviewHandle {
    id: uuid::Uuid,
    src: String,
    live: Arc<AtomicUsize>,
}

impl PreviewHandle {
    pub fn id(&self) -> uuid::Uuid {
        self.id
    }

    pub fn src(&self) -> &str {
        &self.src
    }
}

impl fmt::Debug for PreviewHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreviewHandle")
            .field("id", &self.id)
            .field("src_len", &self.src.len())
            .finish()
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
        log::debug!("preview {} released", self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn renders_data_url_and_releases_on_drop() {
        let registry = PreviewRegistry::new();
        let file = CandidateFile::new("a.png", "image/png", &b"png"[..]);

        let handle = registry.render(&file).await.unwrap();
        assert_eq!(handle.src(), "data:image/png;base64,cG5n");
        assert_eq!(registry.live_count(), 1);

        let second = registry.render(&file).await.unwrap();
        assert_ne!(second.id(), handle.id());
        assert_eq!(registry.live_count(), 2);

        drop(handle);
        drop(second);
        assert_eq!(registry.live_count(), 0);
    }

    #[test]
    fn remote_preview_src() {
        let preview = Preview::Remote("https://cdn/x.png".into());
        assert_eq!(preview.src(), Some("https://cdn/x.png"));
        assert_eq!(Preview::None.src(), None);
    }
}

//! Per-modal upload state machine
//!
//! ```text
//! Idle ──accept──▶ Validating ──▶ Previewing ──▶ Ready ──upload──▶ Uploading ─┬─▶ Uploaded
//!                                                   ▲                          └─▶ Failed
//!                                                   └──────────── upload (retry) ◀─┘
//! any ──reset──▶ Idle
//! ```

use std::sync::Arc;

use huddle_storage::{ObjectKey, ObjectStore, ProgressCallback, StorageError};
use serde::Serialize;
use tokio::sync::watch;

use crate::error::{CoreError, CoreResult};
use crate::types::{AcceptPolicy, CandidateFile, UploadOutcome, UploadStatus};

use super::preview::{Preview, PreviewRegistry};

/// Called with the new percentage whenever upload progress changes.
pub type ProgressListener = Arc<dyn Fn(u8) + Send + Sync>;

/// Live session state, observable through [`UploadSession::subscribe`].
#[derive(Debug, Default)]
pub struct SessionState {
    status: UploadStatus,
    file: Option<CandidateFile>,
    preview: Preview,
    progress_pct: u8,
    result_locator: Option<String>,
    last_error: Option<StorageError>,
    /// Bumped by `accept` and `reset`; async results from older generations are dropped.
    generation: u64,
}

impl SessionState {
    pub fn status(&self) -> UploadStatus {
        self.status
    }

    pub fn file(&self) -> Option<&CandidateFile> {
        self.file.as_ref()
    }

    pub fn preview(&self) -> &Preview {
        &self.preview
    }

    pub fn progress_pct(&self) -> u8 {
        self.progress_pct
    }

    pub fn result_locator(&self) -> Option<&str> {
        self.result_locator.as_deref()
    }

    pub fn last_error(&self) -> Option<&StorageError> {
        self.last_error.as_ref()
    }
}

/// Cloneable view of a session for rendering and logging
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub status: UploadStatus,
    pub file_name: Option<String>,
    pub preview_src: Option<String>,
    pub progress_pct: u8,
    pub result_locator: Option<String>,
    pub error: Option<String>,
}

/// Upload lifecycle of one file for one modal instance.
///
/// All methods take `&self`; state lives in a `watch` channel so the
/// rendering side can subscribe and the progress callback can update it
/// from the transfer task.
pub struct UploadSession {
    policy: AcceptPolicy,
    namespace: String,
    category: String,
    store: Arc<dyn ObjectStore>,
    previews: PreviewRegistry,
    state: Arc<watch::Sender<SessionState>>,
    progress_listener: Option<ProgressListener>,
}

impl UploadSession {
    pub fn new(
        policy: AcceptPolicy,
        namespace: impl Into<String>,
        category: impl Into<String>,
        store: Arc<dyn ObjectStore>,
    ) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self {
            policy,
            namespace: namespace.into(),
            category: category.into(),
            store,
            previews: PreviewRegistry::new(),
            state: Arc::new(state),
            progress_listener: None,
        }
    }

    #[must_use]
    pub fn with_previews(mut self, previews: PreviewRegistry) -> Self {
        self.previews = previews;
        self
    }

    #[must_use]
    pub fn with_progress_listener(mut self, listener: ProgressListener) -> Self {
        self.progress_listener = Some(listener);
        self
    }

    pub fn policy(&self) -> AcceptPolicy {
        self.policy
    }

    pub fn status(&self) -> UploadStatus {
        self.state.borrow().status
    }

    pub fn progress(&self) -> u8 {
        self.state.borrow().progress_pct
    }

    pub fn result_locator(&self) -> Option<String> {
        self.state.borrow().result_locator.clone()
    }

    pub fn has_file(&self) -> bool {
        self.state.borrow().file.is_some()
    }

    pub fn preview_src(&self) -> Option<String> {
        self.state.borrow().preview.src().map(str::to_string)
    }

    pub fn last_error(&self) -> Option<StorageError> {
        self.state.borrow().last_error.clone()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let s = self.state.borrow();
        SessionSnapshot {
            status: s.status,
            file_name: s.file.as_ref().map(|f| f.name.clone()),
            preview_src: s.preview.src().map(str::to_string),
            progress_pct: s.progress_pct,
            result_locator: s.result_locator.clone(),
            error: s.last_error.as_ref().map(ToString::to_string),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Take a dropped file: validate, release the old preview, render a new one.
    ///
    /// A rejected file leaves the session untouched.
    pub async fn accept(&self, file: CandidateFile) -> CoreResult<()> {
        if !self.policy.allows(&file.mime_type) {
            log::warn!(
                "rejected {} ({}): accepted types are {}",
                file.name,
                file.mime_type,
                self.policy.description()
            );
            return Err(CoreError::UnsupportedFileType {
                file_name: file.name,
                mime_type: file.mime_type,
                accepted: self.policy.description().to_string(),
            });
        }

        let mut claimed = None;
        self.state.send_if_modified(|s| {
            if s.status == UploadStatus::Uploading {
                return false;
            }
            s.generation += 1;
            s.status = UploadStatus::Validating;
            s.file = Some(file.clone());
            // drops the previous local preview
            s.preview = Preview::None;
            s.progress_pct = 0;
            s.result_locator = None;
            s.last_error = None;
            claimed = Some(s.generation);
            true
        });
        let Some(generation) = claimed else {
            return Err(CoreError::UploadInProgress);
        };

        if !file.is_image() {
            // documents are listed by name, not rendered
            self.set_status_if_current(generation, UploadStatus::Ready);
            return Ok(());
        }

        self.set_status_if_current(generation, UploadStatus::Previewing);
        log::info!("previewing {} ({} bytes)", file.name, file.size());

        let handle = match self.previews.render(&file).await {
            Ok(handle) => handle,
            Err(e) => {
                self.state.send_if_modified(|s| {
                    if s.generation != generation {
                        return false;
                    }
                    // the file is still held; upload works without a preview
                    s.status = UploadStatus::Ready;
                    true
                });
                return Err(e);
            }
        };

        let current = self.state.send_if_modified(|s| {
            if s.generation != generation {
                // superseded; the handle is released here
                return false;
            }
            s.preview = Preview::Local(handle);
            s.status = UploadStatus::Ready;
            true
        });
        if !current {
            log::debug!("dropping preview of superseded file {}", file.name);
        }
        Ok(())
    }

    /// Show an already-uploaded resource. Ignored while a local file is held.
    pub fn show_existing(&self, locator: impl Into<String>) -> bool {
        let locator = locator.into();
        self.state.send_if_modified(|s| {
            if s.file.is_some() || locator.is_empty() {
                return false;
            }
            s.preview = Preview::Remote(locator);
            true
        })
    }

    /// Transfer the held file and resolve its download URL.
    ///
    /// Concurrent calls while a transfer is running return
    /// [`UploadOutcome::InFlight`] without starting another one.
    pub async fn upload(&self) -> CoreResult<UploadOutcome> {
        let mut early = None;
        let mut claimed = None;
        let mut restarted = false;
        self.state.send_if_modified(|s| match s.status {
            UploadStatus::Uploading => {
                early = Some(UploadOutcome::InFlight);
                false
            }
            UploadStatus::Uploaded => {
                early = Some(
                    s.result_locator
                        .clone()
                        .map_or(UploadOutcome::NoFile, UploadOutcome::AlreadyUploaded),
                );
                false
            }
            _ => match &s.file {
                Some(file) if !s.status.is_busy() => {
                    s.status = UploadStatus::Uploading;
                    restarted = s.progress_pct > 0;
                    s.progress_pct = 0;
                    s.last_error = None;
                    claimed = Some((s.generation, file.clone()));
                    true
                }
                Some(_) => {
                    early = Some(UploadOutcome::InFlight);
                    false
                }
                None => {
                    early = Some(UploadOutcome::NoFile);
                    false
                }
            },
        });
        if let Some(outcome) = early {
            return Ok(outcome);
        }
        let Some((generation, file)) = claimed else {
            return Ok(UploadOutcome::NoFile);
        };
        // a retry starts over from zero
        if restarted {
            if let Some(listener) = &self.progress_listener {
                listener(0);
            }
        }

        let key = ObjectKey::new(&self.namespace, &self.category, &file.name);
        log::info!("uploading {} to {key} via {}", file.name, self.store.id());

        let result = self.transfer(&key, &file, generation).await;

        let mut discarded = false;
        let mut completed_jump = false;
        self.state.send_if_modified(|s| {
            if s.generation != generation {
                discarded = true;
                return false;
            }
            match &result {
                Ok(url) => {
                    completed_jump = s.progress_pct < 100;
                    s.status = UploadStatus::Uploaded;
                    s.result_locator = Some(url.clone());
                    s.progress_pct = 100;
                }
                Err(e) => {
                    s.status = UploadStatus::Failed;
                    s.last_error = Some(e.clone());
                }
            }
            true
        });

        if discarded {
            log::info!("upload of {key} finished after reset; result discarded");
            return Ok(UploadOutcome::Discarded);
        }
        match result {
            Ok(url) => {
                log::info!("uploaded {key}");
                if completed_jump {
                    if let Some(listener) = &self.progress_listener {
                        listener(100);
                    }
                }
                Ok(UploadOutcome::Uploaded(url))
            }
            Err(e) => {
                let err = CoreError::Upload(e);
                err.log(&format!("upload of {key}"));
                Err(err)
            }
        }
    }

    async fn transfer(
        &self,
        key: &ObjectKey,
        file: &CandidateFile,
        generation: u64,
    ) -> Result<String, StorageError> {
        let state = Arc::clone(&self.state);
        let listener = self.progress_listener.clone();
        let on_progress: ProgressCallback = Arc::new(move |progress| {
            let pct = progress.percent();
            let changed = state.send_if_modified(|s| {
                if s.generation != generation
                    || s.status != UploadStatus::Uploading
                    || pct <= s.progress_pct
                {
                    return false;
                }
                s.progress_pct = pct;
                true
            });
            if changed {
                if let Some(listener) = &listener {
                    listener(pct);
                }
            }
        });

        self.store
            .put_object(key, file.data.clone(), &file.mime_type, on_progress)
            .await?;
        self.store.download_url(key).await
    }

    /// Back to `Idle`. Any transfer still running keeps going but its result is dropped.
    pub fn reset(&self) {
        self.state.send_modify(|s| {
            s.generation += 1;
            s.status = UploadStatus::Idle;
            s.file = None;
            s.preview = Preview::None;
            s.progress_pct = 0;
            s.result_locator = None;
            s.last_error = None;
        });
    }

    /// Wait until the session is not validating, previewing or uploading.
    pub async fn wait_settled(&self) -> UploadStatus {
        let mut rx = self.state.subscribe();
        let settled = rx.wait_for(|s| !s.status.is_busy()).await.map(|s| s.status);
        settled.unwrap_or_else(|_| self.status())
    }

    fn set_status_if_current(&self, generation: u64, status: UploadStatus) {
        self.state.send_if_modified(|s| {
            if s.generation != generation {
                return false;
            }
            s.status = status;
            true
        });
    }
}

impl std::fmt::Debug for UploadSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadSession")
            .field("policy", &self.policy)
            .field("store", &self.store.id())
            .field("state", &self.snapshot())
            .finish_non_exhaustive()
    }
}

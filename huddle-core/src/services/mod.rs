//! Business logic service layer

mod invite_service;
mod modal_controller;
mod modal_forms;
mod modal_instance;
mod preview;
mod submission_service;
mod upload_session;

pub use invite_service::InviteService;
pub use modal_controller::ModalController;
pub use modal_forms::{
    CreateChannelForm, CreateServerForm, DeleteServerForm, EditServerForm, MessageFileForm,
    ModalForm,
};
pub use modal_instance::ModalInstance;
pub use preview::{Preview, PreviewHandle, PreviewRegistry};
pub use submission_service::SubmissionService;
pub use upload_session::{ProgressListener, SessionSnapshot, SessionState, UploadSession};

use std::sync::Arc;

use huddle_storage::ObjectStore;

use crate::traits::{BackendApi, Notifier, PageRefresher, ServerDirectory, SessionResolver};
use crate::types::{AcceptPolicy, ModalKind, UploadSettings};

/// Service context - holds all dependencies
///
/// The platform layer builds this once and injects its adapters; the
/// `ModalController` lives here instead of in a global.
pub struct ServiceContext {
    /// Upload destination
    pub object_store: Arc<dyn ObjectStore>,
    /// Mutation endpoint
    pub backend_api: Arc<dyn BackendApi>,
    /// Invite lookups and membership writes
    pub server_directory: Arc<dyn ServerDirectory>,
    /// Signed-in profile
    pub session_resolver: Arc<dyn SessionResolver>,
    /// Toasts
    pub notifier: Arc<dyn Notifier>,
    /// Refresh / navigation
    pub page: Arc<dyn PageRefresher>,
    /// The single modal slot
    pub modal: Arc<ModalController>,
    /// Bucket layout
    pub uploads: UploadSettings,
    /// Shared by every session created from this context
    pub previews: PreviewRegistry,
}

impl ServiceContext {
    /// Create a service context
    #[must_use]
    pub fn new(
        object_store: Arc<dyn ObjectStore>,
        backend_api: Arc<dyn BackendApi>,
        server_directory: Arc<dyn ServerDirectory>,
        session_resolver: Arc<dyn SessionResolver>,
        notifier: Arc<dyn Notifier>,
        page: Arc<dyn PageRefresher>,
        uploads: UploadSettings,
    ) -> Self {
        Self {
            object_store,
            backend_api,
            server_directory,
            session_resolver,
            notifier,
            page,
            modal: Arc::new(ModalController::new()),
            uploads,
            previews: PreviewRegistry::new(),
        }
    }

    /// Upload session for a modal's dropzone, `None` when the modal has none.
    pub fn upload_session(&self, kind: ModalKind) -> Option<UploadSession> {
        let policy = AcceptPolicy::for_modal(kind)?;
        Some(
            UploadSession::new(
                policy,
                &self.uploads.namespace,
                self.uploads.category_for(kind),
                Arc::clone(&self.object_store),
            )
            .with_previews(self.previews.clone()),
        )
    }
}

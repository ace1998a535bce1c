//! A mounted modal: form values plus its upload session

use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::services::{
    ModalController, ModalForm, ServiceContext, SubmissionService, UploadSession,
};
use crate::types::CandidateFile;

/// One modal component's local state.
///
/// Call [`sync`](Self::sync) after every controller change: it resets the
/// upload session and reloads the form whenever the modal closes or is
/// opened again, even with the same payload.
pub struct ModalInstance<F: ModalForm> {
    form: F,
    session: Option<UploadSession>,
    modal: Arc<ModalController>,
    submitter: SubmissionService,
    /// Controller revision the local state belongs to
    mounted: Option<u64>,
}

impl<F: ModalForm> ModalInstance<F> {
    pub fn mount(form: F, ctx: &Arc<ServiceContext>) -> Self {
        let session = ctx.upload_session(form.kind());
        let mut instance = Self {
            form,
            session,
            modal: Arc::clone(&ctx.modal),
            submitter: SubmissionService::new(Arc::clone(ctx)),
            mounted: None,
        };
        instance.sync();
        instance
    }

    pub fn is_active(&self) -> bool {
        self.modal.is_open(self.form.kind())
    }

    /// Bring local state in line with the controller. Returns whether the modal is shown.
    pub fn sync(&mut self) -> bool {
        let state = self.modal.state();
        if !state.is_open(self.form.kind()) {
            if self.mounted.take().is_some() {
                self.discard_local_state();
            }
            return false;
        }

        if self.mounted != Some(state.revision) {
            if self.mounted.is_some() {
                self.discard_local_state();
            }
            self.form.prefill(&state.payload);
            if let (Some(session), Some(existing)) =
                (&self.session, self.form.existing_locator(&state.payload))
            {
                session.show_existing(existing);
            }
            self.mounted = Some(state.revision);
        }
        true
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }

    pub fn session(&self) -> Option<&UploadSession> {
        self.session.as_ref()
    }

    /// Hand a file to the dropzone.
    pub async fn drop_file(&self, file: CandidateFile) -> CoreResult<()> {
        let session = self.session.as_ref().ok_or_else(|| {
            CoreError::ValidationError(format!("{} modal has no dropzone", self.form.kind()))
        })?;
        session.accept(file).await
    }

    pub async fn submit(&mut self) -> CoreResult<serde_json::Value> {
        let response = self
            .submitter
            .submit(&self.form, self.session.as_ref())
            .await?;
        self.sync();
        Ok(response)
    }

    /// Close button: clear the form, then close the modal.
    pub fn close(&mut self) {
        if self.is_active() {
            self.modal.close();
        }
        self.sync();
    }

    fn discard_local_state(&mut self) {
        self.form.reset();
        if let Some(session) = &self.session {
            session.reset();
        }
    }
}

//! Submission sequencing: upload, then exactly one mutation

use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::services::{ModalForm, ServiceContext, UploadSession};
use crate::types::{Notice, UploadOutcome, UploadStatus};

/// Submission service
pub struct SubmissionService {
    ctx: Arc<ServiceContext>,
}

impl SubmissionService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Submit a modal form.
    ///
    /// Only one submit runs at a time; a second one started meanwhile fails
    /// with [`CoreError::SubmissionInProgress`] and sends nothing.
    ///
    /// A held file is uploaded (or its running upload awaited) before the
    /// mutation is built. On success the session is reset, the modal closed,
    /// page effects applied and a notice shown. On failure nothing is reset
    /// so the user can retry.
    pub async fn submit<F: ModalForm + ?Sized>(
        &self,
        form: &F,
        session: Option<&UploadSession>,
    ) -> CoreResult<serde_json::Value> {
        let kind = form.kind();
        if !self.ctx.modal.is_open(kind) {
            return Err(CoreError::ModalNotOpen(kind));
        }
        let Some(_submitting) = self.ctx.modal.begin_submit() else {
            log::debug!("{kind}: submit ignored, another one is running");
            return Err(CoreError::SubmissionInProgress);
        };
        let payload = self.ctx.modal.payload();
        form.validate()?;

        let locator = match session {
            Some(session) => match self.settle_upload(session).await {
                Ok(locator) => locator,
                Err(e) => {
                    e.log(&format!("{kind} submit"));
                    self.ctx.notifier.notify(Notice::from_error(&e));
                    return Err(e);
                }
            },
            None => None,
        };
        if locator.is_none() && form.requires_upload() {
            return Err(CoreError::ValidationError(
                "Attachment is required".to_string(),
            ));
        }

        let request = form.build_request(&payload, locator.as_deref())?;
        log::info!("{kind}: {} {}", request.method, request.target());

        let response = match self.ctx.backend_api.send(&request).await {
            Ok(response) => response,
            Err(e) => {
                let err = match e {
                    CoreError::Submission { .. } => e,
                    other => CoreError::Submission {
                        status: None,
                        message: other.to_string(),
                    },
                };
                err.log(&format!("{kind} submit"));
                self.ctx.notifier.notify(Notice::from_error(&err));
                return Err(err);
            }
        };

        if let Some(session) = session {
            session.reset();
        }
        // the user may have switched modals while the request was running
        if self.ctx.modal.is_open(kind) {
            self.ctx.modal.close();
        }
        form.after_success(self.ctx.page.as_ref());
        if let Some(notice) = form.success_notice() {
            self.ctx.notifier.notify(notice);
        }
        Ok(response)
    }

    /// Drive the session to a terminal state and return its locator.
    async fn settle_upload(&self, session: &UploadSession) -> CoreResult<Option<String>> {
        if session.status().is_busy() {
            session.wait_settled().await;
        }
        if !session.has_file() {
            return Ok(None);
        }
        match session.upload().await? {
            UploadOutcome::Uploaded(url) | UploadOutcome::AlreadyUploaded(url) => Ok(Some(url)),
            UploadOutcome::InFlight => match session.wait_settled().await {
                UploadStatus::Uploaded => Ok(session.result_locator()),
                _ => Err(session
                    .last_error()
                    .map_or(CoreError::UploadInProgress, CoreError::Upload)),
            },
            UploadOutcome::NoFile => Ok(None),
            UploadOutcome::Discarded => Err(CoreError::ValidationError(
                "Upload was abandoned; select the file again".to_string(),
            )),
        }
    }
}

//! Huddle Core Library
//!
//! Client-side core of a chat front end. Provides:
//! - the single global modal slot (`ModalController`)
//! - per-modal upload sessions: dropzone validation, previews, progress
//! - submission sequencing: upload first, then exactly one backend mutation
//! - invite redemption
//!
//! Collaborators (backend API, server directory, session, notifications,
//! page refresh) are reached through traits so the core stays
//! platform-independent.

pub mod error;
pub mod services;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult, ErrorKind};
pub use services::{
    InviteService, ModalController, ModalForm, ModalInstance, ServiceContext, SubmissionService,
    UploadSession,
};
pub use traits::{BackendApi, Notifier, PageRefresher, ServerDirectory, SessionResolver};

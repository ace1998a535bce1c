//! Type definitions

mod invite;
mod modal;
mod notice;
mod request;
mod server;
mod upload;

pub use invite::InviteOutcome;
pub use modal::{ModalKind, ModalPayload, ModalState};
pub use notice::{Notice, NoticeLevel};
pub use request::{AttachmentBody, ChannelBody, HttpMethod, MutationRequest, ServerBody};
pub use server::{ChannelType, Profile, Server};
pub use upload::{AcceptPolicy, CandidateFile, UploadOutcome, UploadSettings, UploadStatus};

// Re-export storage library types used in public signatures
pub use huddle_storage::{ObjectKey, StoredObject, TransferProgress};

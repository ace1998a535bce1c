//! Collaborator abstraction trait definition

mod backend_api;
mod server_directory;
mod session_resolver;
mod ui;

pub use backend_api::BackendApi;
pub use server_directory::ServerDirectory;
pub use session_resolver::SessionResolver;
pub use ui::{Notifier, PageRefresher};

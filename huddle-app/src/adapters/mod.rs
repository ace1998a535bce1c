//! Platform-agnostic adapters for headless front ends (CLI, tests).

mod http_backend;
mod log_sinks;
mod memory_directory;
mod static_session;

pub use http_backend::HttpBackendApi;
pub use log_sinks::{LogNotifier, LogPageRefresher};
pub use memory_directory::InMemoryServerDirectory;
pub use static_session::StaticSessionResolver;

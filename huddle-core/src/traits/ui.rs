//! Shell-side collaborators

use crate::types::Notice;

/// Shows transient notices (toasts)
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Page-level effects after a successful mutation
pub trait PageRefresher: Send + Sync {
    /// Re-fetch server data for the current page
    fn refresh(&self);

    /// Navigate to an absolute route
    fn navigate(&self, path: &str);
}

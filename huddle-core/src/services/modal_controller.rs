//! Single global modal slot

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::watch;

use crate::types::{ModalKind, ModalPayload, ModalState};

/// Owns "which modal is open, with what payload".
///
/// `open` replaces whatever is open (no stacking, no queue). Modals
/// render themselves only while [`is_open`](Self::is_open) is true for their
/// kind and observe changes through [`subscribe`](Self::subscribe).
#[derive(Debug)]
pub struct ModalController {
    state: watch::Sender<ModalState>,
    submitting: AtomicBool,
}

/// Held while a submit runs; releases the slot on drop.
#[derive(Debug)]
pub(crate) struct SubmitGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

impl Default for ModalController {
    fn default() -> Self {
        Self::new()
    }
}

impl ModalController {
    #[must_use]
    pub fn new() -> Self {
        let (state, _) = watch::channel(ModalState::default());
        Self {
            state,
            submitting: AtomicBool::new(false),
        }
    }

    /// Show `kind`. Every call starts a new revision, even with an equal payload.
    pub fn open(&self, kind: ModalKind, payload: ModalPayload) {
        let mut previous = None;
        self.state.send_modify(|s| {
            previous = s.kind.replace(kind);
            s.payload = payload;
            s.revision += 1;
        });
        match previous {
            Some(prev) if prev != kind => log::debug!("modal {prev} replaced by {kind}"),
            _ => log::debug!("modal {kind} opened"),
        }
    }

    pub fn close(&self) {
        let mut previous = None;
        self.state.send_if_modified(|s| {
            previous = s.kind.take();
            if previous.is_none() {
                return false;
            }
            s.payload = ModalPayload::None;
            s.revision += 1;
            true
        });
        if let Some(kind) = previous {
            log::debug!("modal {kind} closed");
        }
    }

    pub fn revision(&self) -> u64 {
        self.state.borrow().revision
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::SeqCst)
    }

    /// Claim the submit slot; `None` while another submit holds it.
    pub(crate) fn begin_submit(&self) -> Option<SubmitGuard<'_>> {
        self.submitting
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| SubmitGuard {
                flag: &self.submitting,
            })
    }

    pub fn is_open(&self, kind: ModalKind) -> bool {
        self.state.borrow().is_open(kind)
    }

    pub fn open_kind(&self) -> Option<ModalKind> {
        self.state.borrow().kind
    }

    pub fn payload(&self) -> ModalPayload {
        self.state.borrow().payload.clone()
    }

    pub fn state(&self) -> ModalState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ModalState> {
        self.state.subscribe()
    }
}

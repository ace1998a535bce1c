//! Notifier and page refresher that only log

use huddle_core::traits::{Notifier, PageRefresher};
use huddle_core::types::{Notice, NoticeLevel};

pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success => log::info!("{}: {}", notice.title, notice.description),
            NoticeLevel::Error => log::warn!("{}: {}", notice.title, notice.description),
        }
    }
}

pub struct LogPageRefresher;

impl PageRefresher for LogPageRefresher {
    fn refresh(&self) {
        log::debug!("page refresh requested");
    }

    fn navigate(&self, path: &str) {
        log::info!("navigate to {path}");
    }
}

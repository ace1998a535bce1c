//! Toasts and navigation rendered on the terminal

use huddle_core::traits::{Notifier, PageRefresher};
use huddle_core::types::{Notice, NoticeLevel};

pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success => println!("[ok] {}: {}", notice.title, notice.description),
            NoticeLevel::Error => eprintln!("[error] {}: {}", notice.title, notice.description),
        }
    }
}

pub struct ConsolePage;

impl PageRefresher for ConsolePage {
    fn refresh(&self) {
        log::debug!("page refresh requested");
    }

    fn navigate(&self, path: &str) {
        println!("-> {path}");
    }
}

//! User-visible notices
//!
//! Fire-and-forget messages for the host's status line. Nothing in the
//! suggestion pipeline depends on a notice being shown.

use std::cell::RefCell;

use tracing::info;

pub trait Notifier {
    fn notify(&self, message: &str);
}

/// Notifier that keeps the messages it was given
///
/// Also mirrors every message to the log.
#[derive(Debug, Default)]
pub struct MessageLog {
    messages: RefCell<Vec<String>>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }

    pub fn last(&self) -> Option<String> {
        self.messages.borrow().last().cloned()
    }

    pub fn clear(&self) {
        self.messages.borrow_mut().clear();
    }
}

impl Notifier for MessageLog {
    fn notify(&self, message: &str) {
        info!(target: "termdict", message, "notice");
        self.messages.borrow_mut().push(message.to_string());
    }
}

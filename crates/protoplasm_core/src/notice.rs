//! Fire-and-forget delivery of short player-facing messages.

use serde::{Deserialize, Serialize};
use std::sync::mpsc::Sender;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayDuration {
    Short,
    Normal,
    Long,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub message: String,
    pub duration: DisplayDuration,
}

impl Notice {
    #[must_use]
    pub fn short<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
            duration: DisplayDuration::Short,
        }
    }
}

/// Receives notices from inside parallel passes. Delivery failures are
/// swallowed and never affect simulation state.
pub trait NoticeSink: Send + Sync {
    fn send(&self, notice: Notice);
}

/// Drops every notice.
impl NoticeSink for () {
    fn send(&self, _notice: Notice) {}
}

/// Writes notices to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNoticeSink;

impl NoticeSink for LogNoticeSink {
    fn send(&self, notice: Notice) {
        tracing::info!(duration = ?notice.duration, "{}", notice.message);
    }
}

impl NoticeSink for std::sync::Mutex<Sender<Notice>> {
    fn send(&self, notice: Notice) {
        let sender = self.lock().unwrap_or_else(|e| e.into_inner());
        // A dropped receiver just means nobody is listening
        let _ = sender.send(notice);
    }
}

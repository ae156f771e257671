//! User-facing form messages with an auto-dismiss lifetime.

use serde::{Deserialize, Serialize};

/// How long a message stays visible before the host dismisses it.
pub const DISMISS_AFTER_MS: u64 = 5000;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Success,
    Error,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FormMessage {
    pub kind: MessageKind,
    pub text: String,
    pub auto_dismiss_ms: u64,
}

impl FormMessage {
    pub fn success(text: &str) -> Self {
        Self {
            kind: MessageKind::Success,
            text: text.to_string(),
            auto_dismiss_ms: DISMISS_AFTER_MS,
        }
    }

    pub fn error(text: &str) -> Self {
        Self {
            kind: MessageKind::Error,
            text: text.to_string(),
            auto_dismiss_ms: DISMISS_AFTER_MS,
        }
    }

    /// True once the message has been on screen longer than its lifetime.
    pub fn is_expired(&self, shown_ms: u64) -> bool {
        shown_ms >= self.auto_dismiss_ms
    }
}

//! Port for structured session logging.
//!
//! Defines the [`ConversationLogger`] trait for recording what happened in a
//! session (avatars generated, photos analyzed, chat replies, wizard steps) to
//! a machine-readable log.
//!
//! This is separate from `tracing`-based diagnostics: tracing is for humans
//! reading operation logs, this port captures the session history (JSONL).

use serde_json::Value;

/// A structured session event.
pub struct ConversationEvent {
    /// Event type identifier (e.g., "avatar_generated", "chat_reply").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging session events.
///
/// `log` is synchronous and infallible; a failing sink must never interrupt
/// generation or chat.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}

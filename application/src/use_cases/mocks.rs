//! Test doubles shared by the use case tests.

use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use crate::ports::session_store::{SessionStore, SessionStoreError};
use async_trait::async_trait;
use companion_domain::CompanionSession;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// In-memory session with a save counter; saves can be made to fail
#[derive(Default)]
pub(crate) struct MockSessionStore {
    session: Mutex<CompanionSession>,
    saves: AtomicUsize,
    failing: AtomicBool,
}

impl MockSessionStore {
    pub(crate) fn with_session(session: CompanionSession) -> Self {
        Self {
            session: Mutex::new(session),
            saves: AtomicUsize::new(0),
            failing: AtomicBool::new(false),
        }
    }

    /// While set, every `save` returns an I/O error and leaves the session untouched
    pub(crate) fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub(crate) fn snapshot(&self) -> CompanionSession {
        self.session.lock().unwrap().clone()
    }

    pub(crate) fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionStore for MockSessionStore {
    async fn load(&self) -> Result<CompanionSession, SessionStoreError> {
        Ok(self.session.lock().unwrap().clone())
    }

    async fn save(&self, session: &CompanionSession) -> Result<(), SessionStoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(std::io::Error::other("disk full").into());
        }
        *self.session.lock().unwrap() = session.clone();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Records event types
#[derive(Default)]
pub(crate) struct RecordingLogger {
    events: Mutex<Vec<(&'static str, serde_json::Value)>>,
}

impl RecordingLogger {
    pub(crate) fn event_types(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().iter().map(|(t, _)| *t).collect()
    }

    pub(crate) fn payload(&self, event_type: &str) -> Option<serde_json::Value> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .find(|(t, _)| *t == event_type)
            .map(|(_, p)| p.clone())
    }
}

impl ConversationLogger for RecordingLogger {
    fn log(&self, event: ConversationEvent) {
        self.events
            .lock()
            .unwrap()
            .push((event.event_type, event.payload));
    }
}

use async_trait::async_trait;
use companion_application::ports::session_store::SessionUpdate;
use companion_application::{SessionStore, SessionStoreError};
use companion_domain::CompanionSession;
use std::sync::Mutex;

/// Session held in process memory
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    session: Mutex<CompanionSession>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: CompanionSession) -> Self {
        Self {
            session: Mutex::new(session),
        }
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self) -> Result<CompanionSession, SessionStoreError> {
        let session = self.session.lock().map_err(|_| SessionStoreError::Poisoned)?;
        Ok(session.clone())
    }

    async fn save(&self, session: &CompanionSession) -> Result<(), SessionStoreError> {
        let mut current = self.session.lock().map_err(|_| SessionStoreError::Poisoned)?;
        *current = session.clone();
        Ok(())
    }

    async fn update(&self, apply: SessionUpdate) -> Result<(), SessionStoreError> {
        let mut current = self.session.lock().map_err(|_| SessionStoreError::Poisoned)?;
        apply(&mut *current);
        Ok(())
    }
}

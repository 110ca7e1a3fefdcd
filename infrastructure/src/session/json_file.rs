use async_trait::async_trait;
use companion_application::ports::session_store::SessionUpdate;
use companion_application::{SessionStore, SessionStoreError};
use companion_domain::CompanionSession;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;

/// Session persisted as a single pretty-printed JSON document.
///
/// A missing file reads as a fresh session. Writes go to a sibling
/// temporary file which is then renamed over the target.
pub struct JsonFileSessionStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process
    lock: Mutex<()>,
}

impl JsonFileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "session.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn read(&self) -> Result<CompanionSession, SessionStoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No session at {}, starting fresh", self.path.display());
                return Ok(CompanionSession::default());
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_slice(&bytes).map_err(|e| {
            SessionStoreError::Serialization(format!("{}: {}", self.path.display(), e))
        })
    }

    async fn write(&self, session: &CompanionSession) -> Result<(), SessionStoreError> {
        let json = serde_json::to_vec_pretty(session)
            .map_err(|e| SessionStoreError::Serialization(e.to_string()))?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let temp = self.temp_path();
        tokio::fs::write(&temp, json).await?;
        tokio::fs::rename(&temp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl SessionStore for JsonFileSessionStore {
    async fn load(&self) -> Result<CompanionSession, SessionStoreError> {
        let _guard = self.lock.lock().await;
        self.read().await
    }

    async fn save(&self, session: &CompanionSession) -> Result<(), SessionStoreError> {
        let _guard = self.lock.lock().await;
        self.write(session).await
    }

    async fn update(&self, apply: SessionUpdate) -> Result<(), SessionStoreError> {
        let _guard = self.lock.lock().await;
        let mut session = self.read().await?;
        apply(&mut session);
        self.write(&session).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use companion_domain::{
        AvatarReference, ChatTurn, PersonaPrompt, UserProfile, WizardState, WizardStep,
    };

    #[tokio::test]
    async fn test_missing_file_is_fresh_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileSessionStore::new(dir.path().join("session.json"));

        let session = store.load().await.unwrap();
        assert_eq!(session, CompanionSession::default());
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_state_survives_new_store_instance() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        {
            let store = JsonFileSessionStore::new(&path);
            store
                .commit_generation(
                    AvatarReference::new("data:image/png;base64,AAAA"),
                    PersonaPrompt::new("A calm character"),
                )
                .await
                .unwrap();
            store.append_turn(ChatTurn::user("hello")).await.unwrap();
            store
                .set_profile(Some(
                    UserProfile::new("Mina", Vec::<String>::new(), None, Default::default())
                        .unwrap(),
                ))
                .await
                .unwrap();
        }

        let reopened = JsonFileSessionStore::new(&path);
        let session = reopened.load().await.unwrap();
        assert!(session.has_avatar());
        assert_eq!(session.prompt.current(), "A calm character");
        assert_eq!(session.transcript.len(), 1);
        assert_eq!(session.profile.map(|p| p.nickname), Some("Mina".to_string()));
        assert!(!reopened.temp_path().exists());
    }

    #[tokio::test]
    async fn test_wizard_state_persists() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileSessionStore::new(dir.path().join("session.json"));

        let state = WizardState {
            step: WizardStep::AskHair,
            skin_color: Some("#F0D5B1".into()),
            ..WizardState::default()
        };
        store.set_wizard(Some(state.clone())).await.unwrap();

        assert_eq!(store.wizard().await.unwrap(), Some(state));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = JsonFileSessionStore::new(&path);
        assert!(matches!(
            store.load().await,
            Err(SessionStoreError::Serialization(_))
        ));
    }

    #[tokio::test]
    async fn test_older_documents_fill_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, r#"{"created": true}"#).unwrap();

        let session = JsonFileSessionStore::new(&path).load().await.unwrap();
        assert!(session.created);
        assert!(session.transcript.is_empty());
    }
}

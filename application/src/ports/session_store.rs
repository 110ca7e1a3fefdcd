//! Session store port
//!
//! A narrow get/set interface over the [`CompanionSession`] aggregate.
//! Adapters only need [`load`](SessionStore::load) and
//! [`save`](SessionStore::save); the per-field accessors are provided on top.

use async_trait::async_trait;
use companion_domain::{
    AvatarAttributes, AvatarReference, ChatTurn, CompanionSession, PersonaPrompt, StoryContext,
    Transcript, UserProfile, WizardState,
};
use thiserror::Error;

/// Errors raised by session persistence
#[derive(Error, Debug)]
pub enum SessionStoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Session lock poisoned")]
    Poisoned,
}

/// Mutation applied by [`SessionStore::update`]
pub type SessionUpdate = Box<dyn FnOnce(&mut CompanionSession) + Send>;

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self) -> Result<CompanionSession, SessionStoreError>;

    async fn save(&self, session: &CompanionSession) -> Result<(), SessionStoreError>;

    /// Read-modify-write. Adapters that can do this under one lock should
    /// override it.
    async fn update(&self, apply: SessionUpdate) -> Result<(), SessionStoreError> {
        let mut session = self.load().await?;
        apply(&mut session);
        self.save(&session).await
    }

    // ==================== Prompt & Avatar ====================

    async fn prompt(&self) -> Result<PersonaPrompt, SessionStoreError> {
        Ok(self.load().await?.prompt)
    }

    async fn set_prompt(&self, prompt: PersonaPrompt) -> Result<(), SessionStoreError> {
        self.update(Box::new(move |s| s.prompt = prompt)).await
    }

    async fn avatar(&self) -> Result<Option<AvatarReference>, SessionStoreError> {
        Ok(self.load().await?.avatar)
    }

    /// Store a new avatar together with the prompt that produced it
    async fn commit_generation(
        &self,
        avatar: AvatarReference,
        prompt: PersonaPrompt,
    ) -> Result<(), SessionStoreError> {
        self.update(Box::new(move |s| s.commit_avatar(avatar, prompt)))
            .await
    }

    // ==================== Conversation ====================

    async fn transcript(&self) -> Result<Transcript, SessionStoreError> {
        Ok(self.load().await?.transcript)
    }

    async fn append_turn(&self, turn: ChatTurn) -> Result<(), SessionStoreError> {
        self.update(Box::new(move |s| s.transcript.push(turn))).await
    }

    async fn clear_transcript(&self) -> Result<(), SessionStoreError> {
        self.update(Box::new(|s| s.transcript.clear())).await
    }

    async fn profile(&self) -> Result<Option<UserProfile>, SessionStoreError> {
        Ok(self.load().await?.profile)
    }

    async fn set_profile(&self, profile: Option<UserProfile>) -> Result<(), SessionStoreError> {
        self.update(Box::new(move |s| s.profile = profile)).await
    }

    async fn story(&self) -> Result<Option<StoryContext>, SessionStoreError> {
        Ok(self.load().await?.story)
    }

    async fn set_story(&self, story: Option<StoryContext>) -> Result<(), SessionStoreError> {
        self.update(Box::new(move |s| s.story = story)).await
    }

    // ==================== Onboarding ====================

    async fn attributes(&self) -> Result<AvatarAttributes, SessionStoreError> {
        Ok(self.load().await?.attributes)
    }

    async fn set_attributes(&self, attributes: AvatarAttributes) -> Result<(), SessionStoreError> {
        self.update(Box::new(move |s| s.attributes = attributes))
            .await
    }

    async fn wizard(&self) -> Result<Option<WizardState>, SessionStoreError> {
        Ok(self.load().await?.wizard)
    }

    async fn set_wizard(&self, wizard: Option<WizardState>) -> Result<(), SessionStoreError> {
        self.update(Box::new(move |s| s.wizard = wizard)).await
    }

    async fn created(&self) -> Result<bool, SessionStoreError> {
        Ok(self.load().await?.created)
    }

    async fn set_created(&self, created: bool) -> Result<(), SessionStoreError> {
        self.update(Box::new(move |s| s.created = created)).await
    }
}

//! Chat Session use case.
//!
//! Owns the transcript protocol around [`ConverseUseCase`]:
//!
//! - `send`: validate, append the user turn, reply, append the companion turn
//!   (degraded replies are returned but not recorded)
//! - `enter_story`: wipe the transcript, activate the story, show its opening
//!   line without calling the model
//! - `leave_story`: back to the default persona
//!
//! All three share one in-flight slot, so a story cannot start or end while
//! a reply is still on its way.

use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::session_store::{SessionStore, SessionStoreError};
use crate::use_cases::converse::{ConversationReply, ConverseUseCase};
use crate::use_cases::shared::InFlightGuard;
use companion_domain::{ChatTurn, StoryContext, UserProfile, ValidationError, find_story};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ChatSessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("A reply is already pending")]
    Busy,

    #[error("Unknown story: {0}")]
    UnknownStory(String),

    #[error("Session store error: {0}")]
    Store(#[from] SessionStoreError),
}

pub struct ChatSessionUseCase {
    store: Arc<dyn SessionStore>,
    converse: ConverseUseCase,
    guard: InFlightGuard,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl ChatSessionUseCase {
    pub fn new(store: Arc<dyn SessionStore>, converse: ConverseUseCase) -> Self {
        Self {
            store,
            converse,
            guard: InFlightGuard::new(),
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.converse = self.converse.with_conversation_logger(logger.clone());
        self.conversation_logger = logger;
        self
    }

    /// Send one user message and get the companion's reply.
    pub async fn send(&self, message: &str) -> Result<ConversationReply, ChatSessionError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ValidationError::EmptyInput("message").into());
        }
        let _permit = self.guard.try_enter().ok_or(ChatSessionError::Busy)?;

        self.store.append_turn(ChatTurn::user(message)).await?;

        let session = self.store.load().await?;
        let reply = self
            .converse
            .execute(message, session.profile.as_ref(), session.story.as_ref())
            .await;

        if !reply.degraded {
            self.store.append_turn(reply.turn.clone()).await?;
        }

        Ok(reply)
    }

    /// Start a story with a custom context.
    ///
    /// Returns the opening turn, if the story has one. Refused while a reply
    /// is pending.
    pub async fn enter_story(
        &self,
        story: StoryContext,
    ) -> Result<Option<ChatTurn>, ChatSessionError> {
        let _permit = self.guard.try_enter().ok_or(ChatSessionError::Busy)?;
        self.open_story(story).await
    }

    /// Start one of the built-in stories.
    pub async fn enter_catalog_story(
        &self,
        story_id: &str,
    ) -> Result<Option<ChatTurn>, ChatSessionError> {
        let scenario =
            find_story(story_id).ok_or_else(|| ChatSessionError::UnknownStory(story_id.to_string()))?;
        let _permit = self.guard.try_enter().ok_or(ChatSessionError::Busy)?;

        info!("Entering story {} ({})", scenario.id, scenario.title);
        self.conversation_logger.log(ConversationEvent::new(
            "story_entered",
            serde_json::json!({
                "story_id": scenario.id,
                "title": scenario.title,
            }),
        ));

        self.open_story(scenario.context()).await
    }

    pub async fn leave_story(&self) -> Result<(), ChatSessionError> {
        let _permit = self.guard.try_enter().ok_or(ChatSessionError::Busy)?;
        self.store.set_story(None).await?;
        info!("Left story mode");
        Ok(())
    }

    /// Caller holds the in-flight permit
    async fn open_story(&self, story: StoryContext) -> Result<Option<ChatTurn>, ChatSessionError> {
        self.store
            .update(Box::new(move |s| s.enter_story(story)))
            .await?;
        Ok(self.store.transcript().await?.turns().first().cloned())
    }

    /// Store the user profile used to personalize replies.
    pub async fn update_profile(&self, profile: UserProfile) -> Result<(), ChatSessionError> {
        info!(
            "Profile updated: {} ({} interests)",
            profile.nickname,
            profile.interests.len()
        );
        self.store.set_profile(Some(profile)).await?;
        Ok(())
    }
}

//! Converse use case.
//!
//! Composes the system instruction (default persona or story override, plus
//! the user profile), makes one chat call and extracts the emotion tag from
//! the reply. A failed call degrades to a fixed companion line instead of an
//! error.

use crate::config::ConversationParams;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::remote_service::ChatGateway;
use companion_domain::util::preview;
use companion_domain::{ChatTurn, PromptTemplate, StoryContext, UserProfile, parse_emotion};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Companion reply to one user message
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationReply {
    pub turn: ChatTurn,
    /// The model did not answer; `turn` holds the failure text
    pub degraded: bool,
}

pub struct ConverseUseCase {
    gateway: Arc<dyn ChatGateway>,
    params: ConversationParams,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl ConverseUseCase {
    pub fn new(gateway: Arc<dyn ChatGateway>, params: ConversationParams) -> Self {
        Self {
            gateway,
            params,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn params(&self) -> &ConversationParams {
        &self.params
    }

    pub async fn execute(
        &self,
        user_message: &str,
        profile: Option<&UserProfile>,
        story: Option<&StoryContext>,
    ) -> ConversationReply {
        let instruction = PromptTemplate::system_instruction(story, profile, &self.params.language);
        let prompt = PromptTemplate::chat_prompt(&instruction, user_message);

        debug!(
            "Chat turn (story: {}, profile: {}): {}",
            story.is_some(),
            profile.is_some(),
            preview(user_message, 100)
        );

        match self.gateway.complete(&self.params.model, &prompt).await {
            Ok(raw) => {
                let (text, emotion) = parse_emotion(&raw);
                info!("Companion replied [{}]: {}", emotion, preview(&text, 80));

                self.conversation_logger.log(ConversationEvent::new(
                    "chat_reply",
                    serde_json::json!({
                        "model": self.params.model.to_string(),
                        "user": user_message,
                        "reply": text,
                        "emotion": emotion.as_str(),
                        "story": story.is_some(),
                    }),
                ));

                ConversationReply {
                    turn: ChatTurn::companion_with_emotion(text, emotion),
                    degraded: false,
                }
            }
            Err(e) => {
                warn!("Chat model {} failed: {}", self.params.model, e);
                ConversationReply {
                    turn: ChatTurn::companion(self.params.failure_text.clone()),
                    degraded: true,
                }
            }
        }
    }
}

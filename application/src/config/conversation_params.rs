//! Conversation parameters.

use companion_domain::Model;
use serde::{Deserialize, Serialize};

pub const DEFAULT_LANGUAGE: &str = "Korean";
pub const DEFAULT_FAILURE_TEXT: &str = "오류가 발생했어요.";

/// Controls how the companion replies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationParams {
    /// Chat model
    pub model: Model,
    /// Language the companion answers in
    pub language: String,
    /// Companion text shown when the chat call fails
    pub failure_text: String,
}

impl Default for ConversationParams {
    fn default() -> Self {
        Self {
            model: Model::default_chat(),
            language: DEFAULT_LANGUAGE.to_string(),
            failure_text: DEFAULT_FAILURE_TEXT.to_string(),
        }
    }
}

impl ConversationParams {
    // ==================== Builder Methods ====================

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_failure_text(mut self, text: impl Into<String>) -> Self {
        self.failure_text = text.into();
        self
    }
}

//! Session behavior settings (`[conversation]`, `[wizard]`, `[post_process]`,
//! `[logging]` sections)

use companion_application::{ConversationParams, WizardPacing};
use companion_application::config::conversation_params::{DEFAULT_FAILURE_TEXT, DEFAULT_LANGUAGE};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// ```toml
/// [conversation]
/// language = "Korean"
/// failure_text = "오류가 발생했어요."
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConversationConfig {
    pub language: String,
    pub failure_text: String,
}

impl Default for FileConversationConfig {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            failure_text: DEFAULT_FAILURE_TEXT.to_string(),
        }
    }
}

impl FileConversationConfig {
    /// Combine with the chat model from `[models]`
    pub fn params(&self, chat_model: companion_domain::Model) -> ConversationParams {
        ConversationParams::default()
            .with_model(chat_model)
            .with_language(&self.language)
            .with_failure_text(&self.failure_text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileWizardConfig {
    pub step_delay_ms: u64,
    pub completion_delay_ms: u64,
}

impl Default for FileWizardConfig {
    fn default() -> Self {
        Self {
            step_delay_ms: 500,
            completion_delay_ms: 1500,
        }
    }
}

impl FileWizardConfig {
    pub fn pacing(&self) -> WizardPacing {
        WizardPacing::from_millis(self.step_delay_ms, self.completion_delay_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePostProcessConfig {
    /// Artificial delay of the passthrough post-processor
    pub delay_ms: u64,
}

impl Default for FilePostProcessConfig {
    fn default() -> Self {
        Self { delay_ms: 1000 }
    }
}

impl FilePostProcessConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL session event log; disabled when unset
    pub conversation_log: Option<PathBuf>,
}

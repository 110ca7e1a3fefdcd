//! TOML file configuration
//!
//! Every section is optional; missing keys fall back to built-in defaults.

mod models;
mod services;
mod session;

pub use models::FileModelsConfig;
pub use services::{FileGeminiConfig, FileTalkingHeadConfig};
pub use session::{
    FileConversationConfig, FileLoggingConfig, FilePostProcessConfig, FileWizardConfig,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("model name for '{0}' cannot be empty")]
    EmptyModelName(&'static str),

    #[error("timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("max_poll_attempts cannot be 0")]
    ZeroPollAttempts,
}

/// Root of the configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub models: FileModelsConfig,
    pub gemini: FileGeminiConfig,
    pub conversation: FileConversationConfig,
    pub wizard: FileWizardConfig,
    pub post_process: FilePostProcessConfig,
    pub talking_head: FileTalkingHeadConfig,
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if let Some(field) = self.models.empty_fields().first() {
            return Err(ConfigValidationError::EmptyModelName(field));
        }

        if self.gemini.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        if self.talking_head.max_poll_attempts == 0 {
            return Err(ConfigValidationError::ZeroPollAttempts);
        }

        Ok(())
    }
}

//! Remote service settings (`[gemini]`, `[talking_head]` sections)

use companion_application::PollPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Gemini REST endpoint settings
///
/// ```toml
/// [gemini]
/// api_base = "https://generativelanguage.googleapis.com/v1beta"
/// api_key_env = "GEMINI_API_KEY"
/// timeout_seconds = 90
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGeminiConfig {
    pub api_base: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Per-request timeout
    pub timeout_seconds: u64,
}

impl Default for FileGeminiConfig {
    fn default() -> Self {
        Self {
            api_base: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            timeout_seconds: 90,
        }
    }
}

impl FileGeminiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Talking-head video (Replicate) settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTalkingHeadConfig {
    pub api_base: String,
    /// Environment variable holding the API token
    pub token_env: String,
    pub model_version: String,
    pub poll_interval_ms: u64,
    pub max_poll_attempts: u32,
}

impl Default for FileTalkingHeadConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.replicate.com/v1".to_string(),
            token_env: "REPLICATE_API_TOKEN".to_string(),
            model_version: "3aa3dac9353cc4d6bd62a8f95957bd844003b401ca4e4a9b33baa574c549d376"
                .to_string(),
            poll_interval_ms: 2000,
            max_poll_attempts: 90,
        }
    }
}

impl FileTalkingHeadConfig {
    pub fn poll_policy(&self) -> PollPolicy {
        PollPolicy::new(
            Duration::from_millis(self.poll_interval_ms),
            self.max_poll_attempts,
        )
    }
}

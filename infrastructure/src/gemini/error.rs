//! Error types for the Gemini adapter

use companion_application::RemoteServiceError;
use thiserror::Error;

/// Result type alias for Gemini operations
pub type Result<T> = std::result::Result<T, GeminiError>;

#[derive(Error, Debug)]
pub enum GeminiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gemini returned HTTP {code}: {message}")]
    Status { code: u16, message: String },

    #[error("Gemini API error: {0}")]
    Api(String),

    #[error("Invalid JSON payload: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    #[error("Response contained no {0}")]
    MissingPayload(&'static str),

    #[error("API key not set (checked {0})")]
    MissingApiKey(String),
}

impl From<GeminiError> for RemoteServiceError {
    fn from(error: GeminiError) -> Self {
        match error {
            GeminiError::Http(e) if e.is_timeout() => RemoteServiceError::Timeout,
            GeminiError::Http(e) => RemoteServiceError::Transport(e.to_string()),
            GeminiError::Status { code, message } => RemoteServiceError::Status { code, message },
            GeminiError::Api(message) => RemoteServiceError::Api(message),
            GeminiError::InvalidResponse(e) => {
                RemoteServiceError::Transport(format!("invalid JSON payload: {}", e))
            }
            GeminiError::MissingPayload(what) => RemoteServiceError::MissingPayload(what),
            GeminiError::MissingApiKey(vars) => {
                RemoteServiceError::Configuration(format!("API key not set (checked {})", vars))
            }
        }
    }
}

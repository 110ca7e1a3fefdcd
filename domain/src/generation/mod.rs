//! Avatar generation value objects.

use crate::core::model::Model;
use serde::{Deserialize, Serialize};

/// A single image-generation request (Value Object)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    prompt: String,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }
}

/// Outcome of one pass through the model cascade
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GenerationResult {
    Success { image_uri: String, model_used: Model },
    Failure { error_message: String },
}

impl GenerationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, GenerationResult::Success { .. })
    }

    pub fn image_uri(&self) -> Option<&str> {
        match self {
            GenerationResult::Success { image_uri, .. } => Some(image_uri),
            GenerationResult::Failure { .. } => None,
        }
    }

    pub fn model_used(&self) -> Option<&Model> {
        match self {
            GenerationResult::Success { model_used, .. } => Some(model_used),
            GenerationResult::Failure { .. } => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            GenerationResult::Failure { error_message } => Some(error_message),
            GenerationResult::Success { .. } => None,
        }
    }
}

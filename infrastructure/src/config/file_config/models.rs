//! Role-based model configuration from TOML (`[models]` section)

use companion_application::ModelCascade;
use companion_domain::Model;
use serde::{Deserialize, Serialize};

/// Role-based model configuration from TOML
///
/// # Example
///
/// ```toml
/// [models]
/// primary_image = "gemini-3-pro-image-preview"   # Tried first
/// fallback_image = "gemini-2.5-flash-image"      # Tried once if primary fails
/// vision = "gemini-1.5-flash"                    # Photo analysis
/// chat = "gemini-3-pro-preview"                  # Conversation
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelsConfig {
    pub primary_image: String,
    pub fallback_image: String,
    pub vision: String,
    pub chat: String,
}

impl Default for FileModelsConfig {
    fn default() -> Self {
        Self {
            primary_image: Model::default_primary_image().to_string(),
            fallback_image: Model::default_fallback_image().to_string(),
            vision: Model::default_vision().to_string(),
            chat: Model::default_chat().to_string(),
        }
    }
}

impl FileModelsConfig {
    /// Fields whose model name is blank
    pub fn empty_fields(&self) -> Vec<&'static str> {
        [
            ("primary_image", &self.primary_image),
            ("fallback_image", &self.fallback_image),
            ("vision", &self.vision),
            ("chat", &self.chat),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    pub fn cascade(&self) -> ModelCascade {
        ModelCascade::new(parse(&self.primary_image), parse(&self.fallback_image))
    }

    pub fn vision_model(&self) -> Model {
        parse(&self.vision)
    }

    pub fn chat_model(&self) -> Model {
        parse(&self.chat)
    }
}

fn parse(name: &str) -> Model {
    match name.parse() {
        Ok(model) => model,
        Err(never) => match never {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cascade_from_config() {
        let config = FileModelsConfig {
            primary_image: "my-image-model".into(),
            ..FileModelsConfig::default()
        };
        let cascade = config.cascade();
        assert_eq!(cascade.primary, Model::Custom("my-image-model".into()));
        assert_eq!(cascade.fallback, Model::Gemini25FlashImage);
    }

    #[test]
    fn test_empty_fields() {
        let config = FileModelsConfig {
            vision: "  ".into(),
            ..FileModelsConfig::default()
        };
        assert_eq!(config.empty_fields(), vec!["vision"]);
        assert!(FileModelsConfig::default().empty_fields().is_empty());
    }
}

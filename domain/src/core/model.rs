//! Model value object identifying a remote generative model

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Remote models used by the companion pipelines (Value Object)
///
/// Image generation runs a two-tier cascade (primary, then fallback);
/// photo analysis and chat each use a single model.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    // Image generation
    Gemini3ProImage,
    Gemini25FlashImage,
    // Vision
    Gemini15Flash,
    // Chat
    Gemini3Pro,
    // Custom
    Custom(String),
}

impl Model {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::Gemini3ProImage => "gemini-3-pro-image-preview",
            Model::Gemini25FlashImage => "gemini-2.5-flash-image",
            Model::Gemini15Flash => "gemini-1.5-flash",
            Model::Gemini3Pro => "gemini-3-pro-preview",
            Model::Custom(s) => s,
        }
    }

    /// Primary image model of the avatar cascade
    pub fn default_primary_image() -> Model {
        Model::Gemini3ProImage
    }

    /// Fallback image model of the avatar cascade
    pub fn default_fallback_image() -> Model {
        Model::Gemini25FlashImage
    }

    /// Model used to describe uploaded photos
    pub fn default_vision() -> Model {
        Model::Gemini15Flash
    }

    /// Model used for companion chat
    pub fn default_chat() -> Model {
        Model::Gemini3Pro
    }

    /// Check if this model produces images
    pub fn is_image_model(&self) -> bool {
        match self {
            Model::Gemini3ProImage | Model::Gemini25FlashImage => true,
            Model::Custom(s) => s.contains("image"),
            _ => false,
        }
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.trim() {
            "gemini-3-pro-image-preview" => Model::Gemini3ProImage,
            "gemini-2.5-flash-image" => Model::Gemini25FlashImage,
            "gemini-1.5-flash" => Model::Gemini15Flash,
            "gemini-3-pro-preview" => Model::Gemini3Pro,
            other => Model::Custom(other.to_string()),
        })
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<Model>().map_err(serde::de::Error::custom)
    }
}

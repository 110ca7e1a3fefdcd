//! Avatar attributes and references

use serde::{Deserialize, Serialize};

/// Attributes collected by the creation wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvatarAttributes {
    /// Skin tone as a hex color
    pub skin_color: String,
    pub hair_style: String,
    pub outfit: String,
}

impl Default for AvatarAttributes {
    fn default() -> Self {
        Self {
            skin_color: "#F0D5B1".to_string(),
            hair_style: "default".to_string(),
            outfit: "casual".to_string(),
        }
    }
}

/// Opaque reference to the companion's current image (e.g. a data URI).
///
/// The core never decodes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AvatarReference(String);

impl AvatarReference {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the reference embeds its bytes as a `data:` URI.
    pub fn is_inline(&self) -> bool {
        self.0.starts_with("data:")
    }
}

impl std::fmt::Display for AvatarReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

//! Ordered image-model cascade.

use companion_domain::Model;
use serde::{Deserialize, Serialize};

/// Primary and fallback image models.
///
/// Each model is tried at most once per generation, in order, with no
/// backoff between attempts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelCascade {
    pub primary: Model,
    pub fallback: Model,
}

impl Default for ModelCascade {
    fn default() -> Self {
        Self {
            primary: Model::default_primary_image(),
            fallback: Model::default_fallback_image(),
        }
    }
}

impl ModelCascade {
    pub fn new(primary: Model, fallback: Model) -> Self {
        Self { primary, fallback }
    }

    /// Models in attempt order
    pub fn models(&self) -> [&Model; 2] {
        [&self.primary, &self.fallback]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_order() {
        let cascade = ModelCascade::default();
        let [first, second] = cascade.models();
        assert_eq!(first.as_str(), "gemini-3-pro-image-preview");
        assert_eq!(second.as_str(), "gemini-2.5-flash-image");
    }
}

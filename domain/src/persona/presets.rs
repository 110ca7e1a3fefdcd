//! Customizer presets
//!
//! Ready-made appearance modifiers offered next to the free-text prompt box.
//! Selecting one is equivalent to typing its `prompt`.

use serde::{Deserialize, Serialize};

/// Customizer category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetCategory {
    Hair,
    Outfit,
}

impl PresetCategory {
    pub fn as_str(&self) -> &str {
        match self {
            PresetCategory::Hair => "hair",
            PresetCategory::Outfit => "outfit",
        }
    }
}

impl std::str::FromStr for PresetCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hair" => Ok(PresetCategory::Hair),
            "outfit" => Ok(PresetCategory::Outfit),
            other => Err(format!("unknown preset category: {}", other)),
        }
    }
}

/// A preset appearance modifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppearancePreset {
    pub id: &'static str,
    pub category: PresetCategory,
    pub label: &'static str,
    pub prompt: &'static str,
}

const PRESETS: &[AppearancePreset] = &[
    AppearancePreset {
        id: "hair-pink-bob",
        category: PresetCategory::Hair,
        label: "Pink bob",
        prompt: "short pink bob hair",
    },
    AppearancePreset {
        id: "hair-long-wave",
        category: PresetCategory::Hair,
        label: "Long waves",
        prompt: "long wavy brown hair",
    },
    AppearancePreset {
        id: "hair-ponytail",
        category: PresetCategory::Hair,
        label: "Ponytail",
        prompt: "high ponytail blonde hair",
    },
    AppearancePreset {
        id: "hair-twin-tails",
        category: PresetCategory::Hair,
        label: "Twin tails",
        prompt: "twin tails blue hair",
    },
    AppearancePreset {
        id: "outfit-suit",
        category: PresetCategory::Outfit,
        label: "Suit",
        prompt: "formal black suit",
    },
    AppearancePreset {
        id: "outfit-casual",
        category: PresetCategory::Outfit,
        label: "Casual",
        prompt: "casual hoodie and jeans",
    },
    AppearancePreset {
        id: "outfit-dress",
        category: PresetCategory::Outfit,
        label: "Dress",
        prompt: "elegant red evening dress",
    },
    AppearancePreset {
        id: "outfit-uniform",
        category: PresetCategory::Outfit,
        label: "School uniform",
        prompt: "school uniform",
    },
];

/// All presets, in display order
pub fn presets() -> &'static [AppearancePreset] {
    PRESETS
}

/// Presets belonging to one category
pub fn presets_in(category: PresetCategory) -> impl Iterator<Item = &'static AppearancePreset> {
    PRESETS.iter().filter(move |p| p.category == category)
}

pub fn find_preset(id: &str) -> Option<&'static AppearancePreset> {
    PRESETS.iter().find(|p| p.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_split_by_category() {
        assert_eq!(presets_in(PresetCategory::Hair).count(), 4);
        assert_eq!(presets_in(PresetCategory::Outfit).count(), 4);
        assert!(presets_in(PresetCategory::Hair).all(|p| p.prompt.contains("hair")));
    }

    #[test]
    fn test_find_preset() {
        assert_eq!(find_preset("outfit-suit").unwrap().prompt, "formal black suit");
        assert!(find_preset("hat").is_none());
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("Hair".parse::<PresetCategory>(), Ok(PresetCategory::Hair));
        assert!("background".parse::<PresetCategory>().is_err());
    }
}

//! Accumulated persona prompt
//!
//! The persona prompt is the natural-language description of the companion's
//! appearance. It only ever grows: each customization appends a modifier
//! clause, so the history of edits is retained in the string itself.

use serde::{Deserialize, Serialize};

/// Baseline description every new session starts from.
pub const DEFAULT_PERSONA_PROMPT: &str = "A friendly virtual friend character";

/// Prefix used when a prompt is seeded from an analyzed reference photo.
pub const REFERENCE_PHOTO_PREFIX: &str = "Character based on reference photo:";

/// Accumulated description of the companion (Value Object)
///
/// Never empty: constructing from a blank string falls back to
/// [`DEFAULT_PERSONA_PROMPT`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct PersonaPrompt(String);

impl PersonaPrompt {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        if base.trim().is_empty() {
            Self::default()
        } else {
            Self(base)
        }
    }

    /// Seed a prompt from a vision description of an uploaded photo.
    pub fn from_reference_photo(description: &str) -> Self {
        Self(format!("{} {}", REFERENCE_PHOTO_PREFIX, description))
    }

    pub fn current(&self) -> &str {
        &self.0
    }

    /// Append a modifier clause and return the new full prompt.
    ///
    /// The modifier is not validated here; blank modifiers produce a
    /// trailing `", "` clause. Callers that need stricter input reject it
    /// before reaching the accumulator.
    pub fn append(&mut self, modifier: &str) -> &str {
        self.0.push_str(", ");
        self.0.push_str(modifier);
        &self.0
    }

    /// Same as [`append`](Self::append) but leaves `self` untouched.
    pub fn appended(&self, modifier: &str) -> PersonaPrompt {
        let mut next = self.clone();
        next.append(modifier);
        next
    }

    /// Replace the baseline wholesale.
    pub fn reset(&mut self, base: impl Into<String>) {
        *self = Self::new(base);
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Default for PersonaPrompt {
    fn default() -> Self {
        Self(DEFAULT_PERSONA_PROMPT.to_string())
    }
}

impl From<String> for PersonaPrompt {
    fn from(base: String) -> Self {
        Self::new(base)
    }
}

impl From<PersonaPrompt> for String {
    fn from(prompt: PersonaPrompt) -> Self {
        prompt.0
    }
}

impl std::fmt::Display for PersonaPrompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_baseline() {
        assert_eq!(PersonaPrompt::default().current(), DEFAULT_PERSONA_PROMPT);
        assert_eq!(PersonaPrompt::new("   ").current(), DEFAULT_PERSONA_PROMPT);
    }

    #[test]
    fn test_blank_stored_prompt_loads_as_baseline() {
        let mut prompt: PersonaPrompt = serde_json::from_str("\"\"").unwrap();
        assert_eq!(prompt.current(), DEFAULT_PERSONA_PROMPT);
        assert_eq!(
            prompt.append("blue hair"),
            "A friendly virtual friend character, blue hair"
        );

        let stored = serde_json::to_string(&PersonaPrompt::new("A cat girl")).unwrap();
        assert_eq!(stored, "\"A cat girl\"");
    }

    #[test]
    fn test_append_returns_new_full_prompt() {
        let mut prompt = PersonaPrompt::new("A cat girl");
        assert_eq!(prompt.append("blue hair"), "A cat girl, blue hair");
        assert_eq!(prompt.current(), "A cat girl, blue hair");
    }

    #[test]
    fn test_append_sequence_is_comma_joined_in_call_order() {
        let modifiers = ["short pink bob hair", "formal black suit", "round glasses"];
        let mut prompt = PersonaPrompt::default();
        for m in &modifiers {
            prompt.append(m);
        }

        let expected = std::iter::once(DEFAULT_PERSONA_PROMPT)
            .chain(modifiers.iter().copied())
            .collect::<Vec<_>>()
            .join(", ");
        assert_eq!(prompt.current(), expected);
    }

    #[test]
    fn test_blank_modifier_is_accepted_as_is() {
        let mut prompt = PersonaPrompt::new("base");
        assert_eq!(prompt.append("  "), "base,   ");
    }

    #[test]
    fn test_appended_does_not_mutate() {
        let prompt = PersonaPrompt::new("base");
        let next = prompt.appended("hat");
        assert_eq!(prompt.current(), "base");
        assert_eq!(next.current(), "base, hat");
    }

    #[test]
    fn test_reset_and_reference_photo() {
        let mut prompt = PersonaPrompt::new("base, hat");
        prompt.reset("fresh");
        assert_eq!(prompt.current(), "fresh");

        let seeded = PersonaPrompt::from_reference_photo("long red hair, green eyes");
        assert_eq!(
            seeded.current(),
            "Character based on reference photo: long red hair, green eyes"
        );
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let prompt = PersonaPrompt::new("base");
        assert_eq!(serde_json::to_string(&prompt).unwrap(), "\"base\"");
    }
}

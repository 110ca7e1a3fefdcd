//! Emotion tag parsing for companion replies.
//!
//! The chat model is instructed to finish each reply with a bracketed tag
//! such as `[happy]`. This is a loose text protocol, so everything that
//! depends on it goes through [`parse_emotion`]; swapping the format for a
//! structured field later only touches this module.
//!
//! Matching is case-sensitive and exact: `[Happy]` or `[ happy ]` are left in
//! the text untouched.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static EMOTION_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[(happy|sad|neutral|surprised|angry)\]").expect("emotion tag pattern is valid")
});

/// Emotion attached to a companion reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionTag {
    Happy,
    Sad,
    #[default]
    Neutral,
    Surprised,
    Angry,
}

impl EmotionTag {
    pub const ALL: [EmotionTag; 5] = [
        EmotionTag::Happy,
        EmotionTag::Sad,
        EmotionTag::Neutral,
        EmotionTag::Surprised,
        EmotionTag::Angry,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionTag::Happy => "happy",
            EmotionTag::Sad => "sad",
            EmotionTag::Neutral => "neutral",
            EmotionTag::Surprised => "surprised",
            EmotionTag::Angry => "angry",
        }
    }

    /// Bracket notation the model is asked to emit, e.g. `[happy]`
    pub fn bracketed(&self) -> String {
        format!("[{}]", self.as_str())
    }
}

impl std::fmt::Display for EmotionTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EmotionTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EmotionTag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| format!("unknown emotion: {}", s))
    }
}

/// Split a raw model reply into display text and emotion.
///
/// - The emotion is the FIRST bracket token from the enumeration.
/// - EVERY occurrence of a bracket token is removed, then the text is trimmed.
/// - Without any token the emotion is [`EmotionTag::Neutral`].
///
/// # Examples
///
/// ```
/// use companion_domain::conversation::emotion::{parse_emotion, EmotionTag};
///
/// let (text, emotion) = parse_emotion("I'm glad! [happy]");
/// assert_eq!(text, "I'm glad!");
/// assert_eq!(emotion, EmotionTag::Happy);
/// ```
pub fn parse_emotion(raw: &str) -> (String, EmotionTag) {
    let emotion = EMOTION_TAG
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or_default();

    let text = EMOTION_TAG.replace_all(raw, "").trim().to_string();
    (text, emotion)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_trailing_tag() {
        let (text, emotion) = parse_emotion("I'm glad! [happy]");
        assert_eq!(text, "I'm glad!");
        assert_eq!(emotion, EmotionTag::Happy);
    }

    #[test]
    fn test_no_tag_defaults_to_neutral() {
        let (text, emotion) = parse_emotion("  Just talking.  ");
        assert_eq!(text, "Just talking.");
        assert_eq!(emotion, EmotionTag::Neutral);
    }

    #[test]
    fn test_two_tags_first_wins_both_removed() {
        let (text, emotion) = parse_emotion("[surprised] Really? That's sad [sad]");
        assert_eq!(text, "Really? That's sad");
        assert_eq!(emotion, EmotionTag::Surprised);
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let (text, emotion) = parse_emotion("Hey [Happy]");
        assert_eq!(text, "Hey [Happy]");
        assert_eq!(emotion, EmotionTag::Neutral);
    }

    #[test]
    fn test_unknown_bracket_tokens_are_kept() {
        let (text, emotion) = parse_emotion("[shy] hi [angry]");
        assert_eq!(text, "[shy] hi");
        assert_eq!(emotion, EmotionTag::Angry);
    }

    #[test]
    fn test_tag_only_reply() {
        let (text, emotion) = parse_emotion("[neutral]");
        assert_eq!(text, "");
        assert_eq!(emotion, EmotionTag::Neutral);
    }

    #[test]
    fn test_bracketed_roundtrips_through_parser() {
        for tag in EmotionTag::ALL {
            let (_, parsed) = parse_emotion(&format!("ok {}", tag.bracketed()));
            assert_eq!(parsed, tag);
        }
    }
}

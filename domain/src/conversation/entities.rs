//! Conversation domain entities

use super::emotion::EmotionTag;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who authored a chat turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Companion,
}

impl Sender {
    pub fn as_str(&self) -> &str {
        match self {
            Sender::User => "user",
            Sender::Companion => "companion",
        }
    }
}

/// A single message in the conversation (Entity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotion: Option<EmotionTag>,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
            timestamp: Utc::now(),
            emotion: None,
        }
    }

    /// Companion turn without an emotion (pre-authored or degraded text)
    pub fn companion(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Companion,
            text: text.into(),
            timestamp: Utc::now(),
            emotion: None,
        }
    }

    pub fn companion_with_emotion(text: impl Into<String>, emotion: EmotionTag) -> Self {
        Self {
            emotion: Some(emotion),
            ..Self::companion(text)
        }
    }

    /// Emotion to display; absent emotions read as neutral.
    pub fn emotion_or_default(&self) -> EmotionTag {
        self.emotion.unwrap_or_default()
    }

    pub fn is_from_companion(&self) -> bool {
        self.sender == Sender::Companion
    }
}

/// Ordered, append-only conversation log
///
/// The only way to remove turns is [`clear`](Self::clear), used when a story
/// scenario starts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    turns: Vec<ChatTurn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, turn: ChatTurn) {
        self.turns.push(turn);
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Most recent companion turn, used for subtitle-style display
    pub fn last_companion_turn(&self) -> Option<&ChatTurn> {
        self.turns.iter().rev().find(|t| t.is_from_companion())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_constructors() {
        let user = ChatTurn::user("hi");
        assert_eq!(user.sender, Sender::User);
        assert!(user.emotion.is_none());

        let bot = ChatTurn::companion_with_emotion("hello", EmotionTag::Happy);
        assert!(bot.is_from_companion());
        assert_eq!(bot.emotion_or_default(), EmotionTag::Happy);
        assert_eq!(ChatTurn::companion("x").emotion_or_default(), EmotionTag::Neutral);
    }

    #[test]
    fn test_transcript_append_and_clear() {
        let mut transcript = Transcript::new();
        transcript.push(ChatTurn::user("a"));
        transcript.push(ChatTurn::companion("b"));
        transcript.push(ChatTurn::user("c"));
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript.turns()[0].text, "a");
        assert_eq!(transcript.last_companion_turn().unwrap().text, "b");

        transcript.clear();
        assert!(transcript.is_empty());
        assert!(transcript.last_companion_turn().is_none());
    }

    #[test]
    fn test_emotion_omitted_from_json_when_absent() {
        let value = serde_json::to_value(ChatTurn::user("hi")).unwrap();
        assert!(value.get("emotion").is_none());
        assert_eq!(value["sender"], "user");
    }
}

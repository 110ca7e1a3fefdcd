//! User profile consulted when composing chat instructions

use crate::core::error::ValidationError;
use serde::{Deserialize, Serialize};

/// Maximum number of interests a profile can carry
pub const MAX_INTERESTS: usize = 3;

/// How the companion should address the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommunicationStyle {
    #[default]
    Casual,
    Formal,
    Cute,
}

impl CommunicationStyle {
    pub fn as_str(&self) -> &str {
        match self {
            CommunicationStyle::Casual => "casual",
            CommunicationStyle::Formal => "formal",
            CommunicationStyle::Cute => "cute",
        }
    }
}

impl std::fmt::Display for CommunicationStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CommunicationStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "casual" => Ok(CommunicationStyle::Casual),
            "formal" => Ok(CommunicationStyle::Formal),
            "cute" => Ok(CommunicationStyle::Cute),
            other => Err(format!("unknown communication style: {}", other)),
        }
    }
}

/// User preferences collected at onboarding (read-only for this core)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub nickname: String,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mbti: Option<String>,
    #[serde(default)]
    pub communication_style: CommunicationStyle,
}

impl UserProfile {
    /// Build a validated profile.
    ///
    /// Duplicate interests are collapsed before the size check.
    pub fn new(
        nickname: impl Into<String>,
        interests: impl IntoIterator<Item = String>,
        mbti: Option<String>,
        communication_style: CommunicationStyle,
    ) -> Result<Self, ValidationError> {
        let nickname = nickname.into();
        if nickname.trim().is_empty() {
            return Err(ValidationError::EmptyInput("nickname"));
        }

        let mut unique: Vec<String> = Vec::new();
        for interest in interests {
            let interest = interest.trim().to_string();
            if !interest.is_empty() && !unique.contains(&interest) {
                unique.push(interest);
            }
        }
        if unique.len() > MAX_INTERESTS {
            return Err(ValidationError::TooManyInterests {
                max: MAX_INTERESTS,
                got: unique.len(),
            });
        }

        Ok(Self {
            nickname,
            interests: unique,
            mbti: mbti.filter(|m| !m.trim().is_empty()),
            communication_style,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interests(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_valid_profile() {
        let profile = UserProfile::new(
            "Mina",
            interests(&["music", "games", "music"]),
            Some("INFP".into()),
            CommunicationStyle::Cute,
        )
        .unwrap();
        assert_eq!(profile.interests, vec!["music", "games"]);
        assert_eq!(profile.mbti.as_deref(), Some("INFP"));
    }

    #[test]
    fn test_rejects_more_than_three_interests() {
        let err = UserProfile::new(
            "Mina",
            interests(&["a", "b", "c", "d"]),
            None,
            CommunicationStyle::Casual,
        )
        .unwrap_err();
        assert_eq!(err, ValidationError::TooManyInterests { max: 3, got: 4 });
    }

    #[test]
    fn test_rejects_blank_nickname_and_drops_blank_mbti() {
        assert!(
            UserProfile::new(" ", Vec::new(), None, CommunicationStyle::Casual)
                .unwrap_err()
                .is_empty_input()
        );
        let profile =
            UserProfile::new("Jin", Vec::new(), Some(" ".into()), CommunicationStyle::Formal)
                .unwrap();
        assert!(profile.mbti.is_none());
    }

    #[test]
    fn test_style_parse_and_default() {
        assert_eq!("FORMAL".parse::<CommunicationStyle>(), Ok(CommunicationStyle::Formal));
        assert!("rude".parse::<CommunicationStyle>().is_err());
        assert_eq!(CommunicationStyle::default(), CommunicationStyle::Casual);
    }
}

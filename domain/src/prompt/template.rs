//! Prompt templates for image generation, photo analysis and chat

use crate::conversation::profile::{CommunicationStyle, UserProfile};
use crate::conversation::story::StoryContext;

/// Background color the UI chrome is painted with; generated avatars must
/// sit on exactly this color.
pub const AVATAR_BACKGROUND_HEX: &str = "#1a1a2e";

/// Templates for every prompt sent to the remote models
pub struct PromptTemplate;

impl PromptTemplate {
    /// Wrap a persona prompt for avatar generation.
    ///
    /// Forces full-body framing and a flat background matching
    /// [`AVATAR_BACKGROUND_HEX`] so the image composites cleanly.
    pub fn avatar_image(persona_prompt: &str) -> String {
        format!(
            "Create a high-quality 3D rendered character, full body shot (head to toe). {}. \
Isolated on a solid dark midnight blue background (Hex Color {bg}). \
The background must be a flat, uniform dark navy color matching {bg} exactly. \
No gradients, no spotlight effects, no shadows on background. \
High fidelity, friendly virtual friend style.",
            persona_prompt,
            bg = AVATAR_BACKGROUND_HEX
        )
    }

    /// Instruction sent with an uploaded photo
    pub fn image_analysis() -> &'static str {
        "Describe the physical appearance of the character/person in this image in detail \
(hair, eye color, clothing style, gender, accessories) so I can recreate them as a 3D avatar. \
Keep it concise and descriptive."
    }

    /// Default persona instruction for normal (non-story) chat
    pub fn default_persona(language: &str) -> String {
        format!(
            r#"You are a friendly virtual friend (AI character).
The user has created you to be their companion.
Respond to the user's message in {}.
Act like a real friend with a distinct personality.
Keep it short (under 2 sentences).
Analyze the user's emotion and include it at the end in brackets like [happy], [sad], [neutral], [surprised], [angry]."#,
            language
        )
    }

    /// Profile block appended to the system instruction
    pub fn profile_block(profile: &UserProfile) -> String {
        let nickname = if profile.nickname.trim().is_empty() {
            "User"
        } else {
            profile.nickname.as_str()
        };
        let interests = if profile.interests.is_empty() {
            "General".to_string()
        } else {
            profile.interests.join(", ")
        };

        format!(
            r#"[User Profile]
- User's Nickname: {}
- User's Interests: {}
- User's MBTI: {}
- Preferred Communication Style: {}"#,
            nickname,
            interests,
            profile.mbti.as_deref().unwrap_or("Unknown"),
            profile.communication_style
        )
    }

    /// Register directive for the chosen communication style
    pub fn style_directive(style: CommunicationStyle, language: &str) -> String {
        match style {
            CommunicationStyle::Formal => {
                format!("Please use polite {} (honorifics, respectful register).", language)
            }
            CommunicationStyle::Cute => {
                "Please use a cute, affectionate tone with emojis.".to_string()
            }
            CommunicationStyle::Casual => {
                format!("Please use casual {} like a close friend.", language)
            }
        }
    }

    /// Compose the full system instruction for one chat turn.
    ///
    /// The story prompt, when present, replaces the default persona. The
    /// profile block is appended whenever a profile is known, story or not.
    pub fn system_instruction(
        story: Option<&StoryContext>,
        profile: Option<&UserProfile>,
        language: &str,
    ) -> String {
        let mut instruction = match story {
            Some(story) => story.system_prompt.clone(),
            None => Self::default_persona(language),
        };

        if let Some(profile) = profile {
            instruction.push_str("\n\n");
            instruction.push_str(&Self::profile_block(profile));
            instruction.push('\n');
            instruction.push_str(&Self::style_directive(profile.communication_style, language));
        }

        instruction
    }

    /// Final text sent to the chat model
    pub fn chat_prompt(system_instruction: &str, user_message: &str) -> String {
        format!("{}\n\nUser: {}", system_instruction, user_message)
    }
}

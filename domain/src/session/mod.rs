//! Companion session aggregate
//!
//! Everything the orchestration layer reads or writes for one user lives in a
//! single [`CompanionSession`] value. Stores persist it as a whole; use cases
//! go through the narrow accessors of the `SessionStore` port.

use crate::conversation::entities::{ChatTurn, Transcript};
use crate::conversation::profile::UserProfile;
use crate::conversation::story::StoryContext;
use crate::persona::attributes::{AvatarAttributes, AvatarReference};
use crate::persona::prompt::PersonaPrompt;
use crate::wizard::WizardState;
use serde::{Deserialize, Serialize};

/// Session state (Aggregate root)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanionSession {
    pub prompt: PersonaPrompt,
    pub avatar: Option<AvatarReference>,
    pub transcript: Transcript,
    pub profile: Option<UserProfile>,
    pub story: Option<StoryContext>,
    pub attributes: AvatarAttributes,
    /// In-progress creation wizard; `None` when not onboarding
    pub wizard: Option<WizardState>,
    /// Set once the creation wizard has finished
    pub created: bool,
}

impl CompanionSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_avatar(&self) -> bool {
        self.avatar.is_some()
    }

    pub fn in_story(&self) -> bool {
        self.story.is_some()
    }

    /// Commit a successful generation: avatar first, then prompt.
    pub fn commit_avatar(&mut self, avatar: AvatarReference, prompt: PersonaPrompt) {
        self.avatar = Some(avatar);
        self.prompt = prompt;
    }

    /// Start a story: wipe the transcript and show the pre-authored opening.
    pub fn enter_story(&mut self, story: StoryContext) {
        self.transcript.clear();
        if let Some(opening) = &story.opening_message {
            self.transcript.push(ChatTurn::companion(opening.clone()));
        }
        self.story = Some(story);
    }

    pub fn leave_story(&mut self) {
        self.story = None;
    }
}

//! Domain layer for companion-studio
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Persona
//!
//! The companion's look is described by an ever-growing [`PersonaPrompt`].
//! Every customization appends a clause; a reference photo resets it.
//!
//! ## Conversation
//!
//! Chat replies carry a trailing emotion tag such as `[happy]`, extracted by
//! [`parse_emotion`]. A [`StoryContext`] swaps the default persona for a
//! scripted one.
//!
//! ## Creation Wizard
//!
//! A three-question onboarding dialogue ([`CreationWizard`]) that collects
//! [`AvatarAttributes`].

pub mod conversation;
pub mod core;
pub mod generation;
pub mod persona;
pub mod prompt;
pub mod session;
pub mod util;
pub mod wizard;

// Re-export commonly used types
pub use conversation::{
    emotion::{EmotionTag, parse_emotion},
    entities::{ChatTurn, Sender, Transcript},
    profile::{CommunicationStyle, MAX_INTERESTS, UserProfile},
    story::{StoryContext, StoryScenario, find_story, story_catalog},
};
pub use core::{error::ValidationError, model::Model};
pub use generation::{GenerationRequest, GenerationResult};
pub use persona::{
    attributes::{AvatarAttributes, AvatarReference},
    presets::{AppearancePreset, PresetCategory, find_preset, presets, presets_in},
    prompt::{DEFAULT_PERSONA_PROMPT, PersonaPrompt},
};
pub use prompt::{AVATAR_BACKGROUND_HEX, PromptTemplate};
pub use session::CompanionSession;
pub use wizard::{
    AttributeCommit, CreationWizard, PendingTransition, WizardMessage, WizardOption, WizardState,
    WizardStep,
};

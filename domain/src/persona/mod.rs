//! Persona domain.
//!
//! - [`prompt::PersonaPrompt`]: the accumulated appearance description
//! - [`attributes::AvatarAttributes`]: wizard-collected traits
//! - [`attributes::AvatarReference`]: the current companion image
//! - [`presets`]: customizer shortcuts

pub mod attributes;
pub mod presets;
pub mod prompt;

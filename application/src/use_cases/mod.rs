//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod analyze_image;
pub mod avatar_studio;
pub mod chat_session;
pub mod converse;
pub mod creation_wizard;
pub mod generate_avatar;
pub mod shared;
pub mod talking_head;

#[cfg(test)]
pub(crate) mod mocks;

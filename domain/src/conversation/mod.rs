//! Conversation domain.
//!
//! - [`entities::ChatTurn`] / [`entities::Transcript`]: the message log
//! - [`emotion::parse_emotion`]: bracket-tag extraction from replies
//! - [`profile::UserProfile`]: preferences that shape the persona
//! - [`story::StoryContext`]: scripted scenario overrides

pub mod emotion;
pub mod entities;
pub mod profile;
pub mod story;

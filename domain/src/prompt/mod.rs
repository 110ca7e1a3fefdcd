//! Prompt construction for the remote models

pub mod template;

pub use template::{AVATAR_BACKGROUND_HEX, PromptTemplate};

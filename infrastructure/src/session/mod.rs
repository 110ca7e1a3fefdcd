//! Session store adapters
//!
//! - [`InMemorySessionStore`]: process-lifetime state (tests, embedding)
//! - [`JsonFileSessionStore`]: one JSON document on disk, used by the CLI

mod json_file;
mod memory;

pub use json_file::JsonFileSessionStore;
pub use memory::InMemorySessionStore;

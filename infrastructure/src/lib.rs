//! Infrastructure layer for companion-studio
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod gemini;
pub mod logging;
pub mod replicate;
pub mod session;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileConversationConfig, FileGeminiConfig,
    FileLoggingConfig, FileModelsConfig, FilePostProcessConfig, FileTalkingHeadConfig,
    FileWizardConfig,
};
pub use gemini::{
    client::GeminiClient,
    error::{GeminiError, Result},
    inline_image_from_file,
};
pub use logging::JsonlConversationLogger;
pub use replicate::{ReplicateError, ReplicatePredictionGateway};
pub use session::{InMemorySessionStore, JsonFileSessionStore};

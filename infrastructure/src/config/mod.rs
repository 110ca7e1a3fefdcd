//! Configuration file loading for companion-studio
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `COMPANION_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./companion.toml` or `./.companion.toml`
//! 4. Global: `$XDG_CONFIG_HOME/companion-studio/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileConversationConfig, FileGeminiConfig,
    FileLoggingConfig, FileModelsConfig, FilePostProcessConfig, FileTalkingHeadConfig,
    FileWizardConfig,
};
pub use loader::ConfigLoader;

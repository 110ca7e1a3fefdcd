//! CLI command definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for companion
#[derive(Parser, Debug)]
#[command(name = "companion")]
#[command(author, version, about = "Create a virtual companion, customize it and talk to it")]
#[command(long_about = r#"
Companion Studio generates an avatar from a text prompt or a reference photo,
lets you refine it step by step, and chats with it in character.

All state lives in a JSON session file (see --session).

Configuration files are loaded from (in priority order):
1. COMPANION_<SECTION>__<KEY>   Environment variables
2. --config <path>              Explicit config file
3. ./companion.toml             Project-level config
4. ~/.config/companion-studio/config.toml   Global config

Example:
  companion wizard start
  companion wizard select Dark
  companion customize "wearing a yellow raincoat"
  companion story enter story_2
  companion chat "What did the scan find?"
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Session file holding prompt, avatar, transcript and onboarding state
    #[arg(
        long,
        value_name = "PATH",
        default_value = "companion-session.json",
        global = true
    )]
    pub session: PathBuf,

    /// Also write diagnostics to this file
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Append session events as JSONL (overrides [logging] conversation_log)
    #[arg(long, value_name = "PATH", global = true)]
    pub conversation_log: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Append a modifier to the persona prompt and regenerate the avatar
    Customize {
        /// Free-form appearance change, e.g. "wearing a red scarf"
        #[arg(required = true, num_args = 1..)]
        modifier: Vec<String>,
    },

    /// Built-in appearance presets
    #[command(subcommand)]
    Preset(PresetCommand),

    /// Generate an avatar from a reference photo
    Photo {
        /// Image file (png, jpg, webp, ...)
        path: PathBuf,
    },

    /// Generate again from the current prompt
    Regenerate,

    /// Show the current prompt and avatar
    Avatar {
        /// Write the avatar image to this file
        #[arg(long, value_name = "PATH")]
        save: Option<PathBuf>,
    },

    /// Send a message to the companion
    Chat {
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },

    /// Show the conversation so far
    History {
        /// Clear the transcript instead of printing it
        #[arg(long)]
        clear: bool,
    },

    /// Story mode
    #[command(subcommand)]
    Story(StoryCommand),

    /// User profile used to personalize replies
    #[command(subcommand)]
    Profile(ProfileCommand),

    /// Guided avatar creation
    #[command(subcommand)]
    Wizard(WizardCommand),

    /// Render a talking-head video from an image and an audio clip
    Talk(TalkArgs),

    /// Configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand, Debug)]
pub enum PresetCommand {
    /// List presets, optionally for one category (hair, outfit)
    List {
        #[arg(long)]
        category: Option<String>,
    },
    /// Apply a preset by id
    Apply { id: String },
}

#[derive(Subcommand, Debug)]
pub enum StoryCommand {
    /// List built-in stories
    List,
    /// Start a story (clears the transcript)
    Enter { id: String },
    /// Return to free conversation
    Leave,
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommand {
    /// Set the profile
    Set {
        #[arg(long)]
        nickname: String,
        /// Up to three interests (repeatable)
        #[arg(long = "interest", value_name = "INTEREST")]
        interests: Vec<String>,
        #[arg(long)]
        mbti: Option<String>,
        /// casual, formal or cute
        #[arg(long, default_value = "casual")]
        style: String,
    },
    /// Show the stored profile
    Show,
}

#[derive(Subcommand, Debug)]
pub enum WizardCommand {
    /// Start (or resume) the wizard
    Start,
    /// Pick an option by label or value
    Select { choice: String },
    /// Type a free-text answer
    Say {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Show where the wizard stands
    Status,
}

#[derive(Args, Debug)]
pub struct TalkArgs {
    /// Audio clip URL (or data URI)
    #[arg(long)]
    pub audio: String,

    /// Source image URL or data URI; defaults to the current avatar
    #[arg(long)]
    pub image: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show configuration file locations
    Sources,
    /// Print the merged configuration as TOML
    Show,
}

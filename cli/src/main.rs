//! CLI entrypoint for Companion Studio
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod app;
mod commands;
mod output;

use anyhow::{Context, Result, anyhow, bail};
use app::App;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use clap::Parser;
use commands::{
    Cli, Command, ConfigCommand, PresetCommand, ProfileCommand, StoryCommand, TalkArgs,
    WizardCommand,
};
use companion_application::{InlineImage, WizardError};
use companion_domain::{
    CommunicationStyle, PresetCategory, UserProfile, ValidationError, presets, presets_in,
    story_catalog,
};
use companion_infrastructure::{ConfigLoader, inline_image_from_file};
use output::ConsoleFormatter;
use std::path::Path;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    info!("Starting Companion Studio");

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    config.validate().context("Invalid configuration")?;

    let app = App::new(config, &cli.session, cli.conversation_log.clone());
    run(&app, cli.command, cli.config.as_deref()).await
}

/// Initialize logging based on verbosity level; `--log-file` adds a
/// non-blocking file writer next to stderr.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Cannot open log file {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(file_layer)
        .init();

    Ok(guard)
}

async fn run(app: &App, command: Command, config_path: Option<&Path>) -> Result<()> {
    match command {
        Command::Customize { modifier } => {
            let outcome = app.studio()?.customize(&modifier.join(" ")).await?;
            print!("{}", ConsoleFormatter::studio_outcome(&outcome));
        }
        Command::Preset(PresetCommand::List { category }) => {
            let listing = match category {
                Some(name) => {
                    let category: PresetCategory = name.parse().map_err(anyhow::Error::msg)?;
                    ConsoleFormatter::presets(presets_in(category))
                }
                None => ConsoleFormatter::presets(presets()),
            };
            print!("{}", listing);
        }
        Command::Preset(PresetCommand::Apply { id }) => {
            let outcome = app.studio()?.apply_preset(&id).await?;
            print!("{}", ConsoleFormatter::studio_outcome(&outcome));
        }
        Command::Photo { path } => {
            let image = inline_image_from_file(&path)
                .with_context(|| format!("Cannot read photo {}", path.display()))?;
            let outcome = app.studio()?.from_photo(&image).await?;
            print!("{}", ConsoleFormatter::studio_outcome(&outcome));
        }
        Command::Regenerate => {
            let outcome = app.studio()?.regenerate().await?;
            print!("{}", ConsoleFormatter::studio_outcome(&outcome));
        }
        Command::Avatar { save } => {
            let session = app.store().load().await?;
            let avatar = session.avatar.as_ref().map(|a| a.as_str());
            print!("{}", ConsoleFormatter::avatar(&session.prompt, avatar));
            if let Some(path) = save {
                let uri = avatar.context("No avatar has been generated yet")?;
                save_avatar(uri, &path)?;
                println!("Saved to {}", path.display());
            }
        }
        Command::Chat { message } => {
            let reply = app.chat()?.send(&message.join(" ")).await?;
            print!("{}", ConsoleFormatter::reply(&reply));
        }
        Command::History { clear } => {
            if clear {
                app.store().clear_transcript().await?;
                println!("Transcript cleared.");
            } else {
                let transcript = app.store().transcript().await?;
                print!("{}", ConsoleFormatter::transcript(transcript.turns()));
            }
        }
        Command::Story(StoryCommand::List) => {
            print!("{}", ConsoleFormatter::stories(story_catalog()));
        }
        Command::Story(StoryCommand::Enter { id }) => {
            if let Some(opening) = app.chat()?.enter_catalog_story(&id).await? {
                println!("{}", ConsoleFormatter::turn(&opening));
            }
        }
        Command::Story(StoryCommand::Leave) => {
            app.chat()?.leave_story().await?;
            println!("Back to free conversation.");
        }
        Command::Profile(ProfileCommand::Set {
            nickname,
            interests,
            mbti,
            style,
        }) => {
            let style: CommunicationStyle = style.parse().map_err(anyhow::Error::msg)?;
            let profile = UserProfile::new(nickname, interests, mbti, style)?;
            app.chat()?.update_profile(profile.clone()).await?;
            print!("{}", ConsoleFormatter::profile(Some(&profile)));
        }
        Command::Profile(ProfileCommand::Show) => {
            let profile = app.store().profile().await?;
            print!("{}", ConsoleFormatter::profile(profile.as_ref()));
        }
        Command::Wizard(command) => run_wizard(app, command).await?,
        Command::Talk(args) => run_talk(app, args).await?,
        Command::Config(ConfigCommand::Sources) => {
            ConfigLoader::print_config_sources(config_path);
        }
        Command::Config(ConfigCommand::Show) => {
            print!("{}", toml::to_string_pretty(app.config())?);
        }
    }
    Ok(())
}

async fn run_wizard(app: &App, command: WizardCommand) -> Result<()> {
    let wizard = app.wizard();
    let progress = match command {
        WizardCommand::Start => wizard.start().await?,
        WizardCommand::Select { choice } => wizard.select(&choice).await?,
        WizardCommand::Say { text } => wizard.say(&text.join(" ")).await?,
        WizardCommand::Status => match wizard.current().await {
            Ok(Some(progress)) => progress,
            Ok(None) => {
                println!("No wizard in progress. Run `companion wizard start`.");
                return Ok(());
            }
            Err(WizardError::Validation(ValidationError::WizardFinished)) => {
                println!("Your companion has already been created.");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        },
    };
    print!("{}", ConsoleFormatter::wizard_progress(&progress));
    Ok(())
}

async fn run_talk(app: &App, args: TalkArgs) -> Result<()> {
    let image = match args.image {
        Some(image) => image,
        None => app
            .store()
            .avatar()
            .await?
            .map(|a| a.as_str().to_string())
            .context("No avatar yet; pass --image or generate one first")?,
    };

    let video = app.talking_head()?.render(&image, &args.audio).await?;
    println!("{}", video);
    Ok(())
}

fn save_avatar(uri: &str, path: &Path) -> Result<()> {
    let Some(image) = InlineImage::from_data_uri(uri) else {
        bail!("Avatar is not an inline image: {}", uri);
    };
    let bytes = BASE64
        .decode(image.data.as_bytes())
        .context("Avatar payload is not valid base64")?;
    std::fs::write(path, bytes).with_context(|| format!("Cannot write {}", path.display()))?;
    Ok(())
}

//! Console output for studio, chat and wizard results

use colored::Colorize;
use companion_application::{ConversationReply, StudioOutcome, WizardProgress};
use companion_domain::util::preview;
use companion_domain::{
    AppearancePreset, ChatTurn, PersonaPrompt, Sender, StoryScenario, UserProfile, WizardMessage,
};

/// Formats use case results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    pub fn studio_outcome(outcome: &StudioOutcome) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "{} {}\n",
            "Prompt:".cyan().bold(),
            outcome.prompt.current()
        ));

        match (outcome.result.image_uri(), outcome.result.model_used()) {
            (Some(uri), Some(model)) => {
                output.push_str(&format!(
                    "{} {}\n{} {}\n",
                    "Model:".cyan().bold(),
                    model,
                    "Avatar:".green().bold(),
                    preview(uri, 64)
                ));
            }
            _ => {
                output.push_str(&format!(
                    "{} {}\n",
                    "Generation failed:".red().bold(),
                    outcome.result.error_message().unwrap_or("unknown error")
                ));
                output.push_str("The previous avatar and prompt were kept.\n");
            }
        }
        output
    }

    pub fn avatar(prompt: &PersonaPrompt, avatar: Option<&str>) -> String {
        format!(
            "{} {}\n{} {}\n",
            "Prompt:".cyan().bold(),
            prompt.current(),
            "Avatar:".cyan().bold(),
            avatar
                .map(|uri| preview(uri, 64).into_owned())
                .unwrap_or_else(|| "(none yet)".dimmed().to_string())
        )
    }

    pub fn reply(reply: &ConversationReply) -> String {
        let line = Self::turn(&reply.turn);
        if reply.degraded {
            format!("{}\n{}\n", line, "(the companion could not answer)".dimmed())
        } else {
            format!("{}\n", line)
        }
    }

    pub fn turn(turn: &ChatTurn) -> String {
        let who = match turn.sender {
            Sender::User => "you".blue().bold(),
            Sender::Companion => "companion".magenta().bold(),
        };
        match turn.emotion {
            Some(emotion) => format!("{} {} {}", who, emotion.bracketed().yellow(), turn.text),
            None => format!("{} {}", who, turn.text),
        }
    }

    pub fn transcript(turns: &[ChatTurn]) -> String {
        if turns.is_empty() {
            return format!("{}\n", "(no messages yet)".dimmed());
        }
        turns
            .iter()
            .map(|t| {
                format!(
                    "{} {}\n",
                    t.timestamp.format("%H:%M").to_string().dimmed(),
                    Self::turn(t)
                )
            })
            .collect()
    }

    pub fn wizard_progress(progress: &WizardProgress) -> String {
        let mut output: String = progress.messages.iter().map(Self::wizard_message).collect();
        if progress.created {
            output.push_str(&format!("{}\n", "Companion created!".green().bold()));
        } else {
            output.push_str(&format!(
                "{} {}\n",
                "Step:".dimmed(),
                progress.step.as_str().dimmed()
            ));
        }
        output
    }

    fn wizard_message(message: &WizardMessage) -> String {
        let who = match message.sender {
            Sender::User => "you".blue().bold(),
            Sender::Companion => "wizard".magenta().bold(),
        };
        let mut output = format!("{} {}\n", who, message.text);
        for option in message.options {
            output.push_str(&format!("    - {} ({})\n", option.label.bold(), option.value));
        }
        output
    }

    pub fn presets<'a>(presets: impl IntoIterator<Item = &'a AppearancePreset>) -> String {
        presets
            .into_iter()
            .map(|p| {
                format!(
                    "{:<18} {:<8} {} {}\n",
                    p.id.bold(),
                    p.category.as_str(),
                    p.label,
                    format!("\"{}\"", p.prompt).dimmed()
                )
            })
            .collect()
    }

    pub fn stories(stories: &[StoryScenario]) -> String {
        stories
            .iter()
            .map(|s| {
                format!(
                    "{} {} {}\n    {}\n",
                    s.id.bold(),
                    s.title,
                    format!("({})", s.genre).dimmed(),
                    s.description
                )
            })
            .collect()
    }

    pub fn profile(profile: Option<&UserProfile>) -> String {
        let Some(profile) = profile else {
            return format!("{}\n", "(no profile set)".dimmed());
        };
        format!(
            "{} {}\n{} {}\n{} {}\n{} {}\n",
            "Nickname:".cyan().bold(),
            profile.nickname,
            "Interests:".cyan().bold(),
            profile.interests.join(", "),
            "MBTI:".cyan().bold(),
            profile.mbti.as_deref().unwrap_or("-"),
            "Style:".cyan().bold(),
            profile.communication_style.as_str()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use companion_domain::{EmotionTag, GenerationResult, Model, WizardStep, story_catalog};

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_failed_outcome_mentions_kept_avatar() {
        plain();
        let outcome = StudioOutcome {
            prompt: PersonaPrompt::new("A friendly virtual friend character"),
            result: GenerationResult::Failure {
                error_message: "All models failed. Last error: quota".into(),
            },
        };
        let text = ConsoleFormatter::studio_outcome(&outcome);
        assert!(text.contains("Generation failed: All models failed. Last error: quota"));
        assert!(text.contains("kept"));
    }

    #[test]
    fn test_successful_outcome_shows_model() {
        plain();
        let outcome = StudioOutcome {
            prompt: PersonaPrompt::new("A calm character"),
            result: GenerationResult::Success {
                image_uri: "data:image/png;base64,AAAA".into(),
                model_used: Model::Gemini25FlashImage,
            },
        };
        let text = ConsoleFormatter::studio_outcome(&outcome);
        assert!(text.contains("Model: gemini-2.5-flash-image"));
    }

    #[test]
    fn test_turn_shows_emotion() {
        plain();
        let turn = ChatTurn::companion_with_emotion("Nice to meet you!", EmotionTag::Happy);
        assert_eq!(
            ConsoleFormatter::turn(&turn),
            "companion [happy] Nice to meet you!"
        );
    }

    #[test]
    fn test_wizard_progress_lists_options() {
        plain();
        let progress = WizardProgress {
            step: WizardStep::AskSkin,
            messages: vec![WizardMessage {
                sender: Sender::Companion,
                text: WizardStep::AskSkin.prompt().to_string(),
                options: WizardStep::AskSkin.options(),
            }],
            created: false,
        };
        let text = ConsoleFormatter::wizard_progress(&progress);
        for option in WizardStep::AskSkin.options() {
            assert!(text.contains(option.label));
        }
        assert!(text.contains("ask_skin"));
    }

    #[test]
    fn test_stories_listing() {
        plain();
        let text = ConsoleFormatter::stories(story_catalog());
        assert!(text.contains("story_1"));
        assert!(text.contains("story_3"));
    }
}

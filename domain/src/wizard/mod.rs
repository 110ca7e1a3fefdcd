//! Creation wizard state machine.
//!
//! A short linear dialogue that collects three avatar attributes:
//!
//! ```text
//! AskSkin(0) ──select──▶ AskHair(1) ──select──▶ AskOutfit(2) ──select──▶ Done(3)
//! ```
//!
//! Each advancing selection happens in two halves so the caller can insert
//! UI pacing in between:
//!
//! 1. [`CreationWizard::select`] records the user's choice in the transcript
//!    and returns the attribute to commit. The wizard is now *pending*.
//! 2. [`CreationWizard::complete_transition`] appends the next prompt (with
//!    its options) and advances the step.
//!
//! While a transition is pending every other input is rejected, so a double
//! tap cannot skip a step. Free text never advances the state.

use crate::conversation::entities::Sender;
use crate::core::error::ValidationError;
use crate::persona::attributes::AvatarAttributes;
use serde::{Deserialize, Serialize};

pub const GREETING: &str = "Hello! Let's create your avatar together.";
pub const FREE_TEXT_REMINDER: &str = "Please select one of the options above.";

/// Wizard step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    #[default]
    AskSkin,
    AskHair,
    AskOutfit,
    Done,
}

impl WizardStep {
    pub fn index(&self) -> u8 {
        match self {
            WizardStep::AskSkin => 0,
            WizardStep::AskHair => 1,
            WizardStep::AskOutfit => 2,
            WizardStep::Done => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WizardStep::AskSkin => "ask_skin",
            WizardStep::AskHair => "ask_hair",
            WizardStep::AskOutfit => "ask_outfit",
            WizardStep::Done => "done",
        }
    }

    pub fn next(&self) -> WizardStep {
        match self {
            WizardStep::AskSkin => WizardStep::AskHair,
            WizardStep::AskHair => WizardStep::AskOutfit,
            WizardStep::AskOutfit | WizardStep::Done => WizardStep::Done,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, WizardStep::Done)
    }

    /// Bot line shown when this step is entered
    pub fn prompt(&self) -> &'static str {
        match self {
            WizardStep::AskSkin => "First, choose a skin tone.",
            WizardStep::AskHair => "Great choice! Now, what kind of hair style do you prefer?",
            WizardStep::AskOutfit => "Awesome. Finally, pick an outfit style.",
            WizardStep::Done => "All set! Creating your character now...",
        }
    }

    /// Options offered at this step (empty for the terminal step)
    pub fn options(&self) -> &'static [WizardOption] {
        match self {
            WizardStep::AskSkin => SKIN_OPTIONS,
            WizardStep::AskHair => HAIR_OPTIONS,
            WizardStep::AskOutfit => OUTFIT_OPTIONS,
            WizardStep::Done => &[],
        }
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A selectable chip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WizardOption {
    pub label: &'static str,
    pub value: &'static str,
}

impl WizardOption {
    /// Matches either the exact value or the label, ignoring case
    fn matches(&self, input: &str) -> bool {
        let input = input.trim();
        self.value == input || self.label.eq_ignore_ascii_case(input)
    }
}

const SKIN_OPTIONS: &[WizardOption] = &[
    WizardOption { label: "Pale", value: "#F0D5B1" },
    WizardOption { label: "Tan", value: "#E0AC69" },
    WizardOption { label: "Dark", value: "#8D5524" },
];

const HAIR_OPTIONS: &[WizardOption] = &[
    WizardOption { label: "Short", value: "short" },
    WizardOption { label: "Long", value: "long" },
    WizardOption { label: "Curly", value: "curly" },
];

const OUTFIT_OPTIONS: &[WizardOption] = &[
    WizardOption { label: "Casual", value: "casual" },
    WizardOption { label: "Formal", value: "formal" },
    WizardOption { label: "Sporty", value: "sporty" },
];

/// One line of the wizard dialogue
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WizardMessage {
    pub sender: Sender,
    pub text: String,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    pub options: &'static [WizardOption],
}

impl WizardMessage {
    fn bot(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Companion,
            text: text.into(),
            options: &[],
        }
    }

    fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
            options: &[],
        }
    }

    fn step_prompt(step: WizardStep) -> Self {
        Self {
            sender: Sender::Companion,
            text: step.prompt().to_string(),
            options: step.options(),
        }
    }
}

/// Attribute committed by an advancing selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeCommit {
    SkinColor(String),
    HairStyle(String),
    Outfit(String),
}

impl AttributeCommit {
    pub fn value(&self) -> &str {
        match self {
            AttributeCommit::SkinColor(v) | AttributeCommit::HairStyle(v) | AttributeCommit::Outfit(v) => v,
        }
    }

    pub fn apply_to(self, attributes: &mut AvatarAttributes) {
        match self {
            AttributeCommit::SkinColor(v) => attributes.skin_color = v,
            AttributeCommit::HairStyle(v) => attributes.hair_style = v,
            AttributeCommit::Outfit(v) => attributes.outfit = v,
        }
    }
}

/// Result of the first half of an advancing transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTransition {
    pub from: WizardStep,
    pub to: WizardStep,
    pub commit: AttributeCommit,
}

/// Persistable wizard progress
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardState {
    pub step: WizardStep,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skin_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hair_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outfit: Option<String>,
}

/// The creation wizard (Entity)
#[derive(Debug, Clone)]
pub struct CreationWizard {
    state: WizardState,
    transcript: Vec<WizardMessage>,
    pending: Option<PendingTransition>,
    /// State and transcript length from before the pending selection
    checkpoint: Option<(WizardState, usize)>,
}

impl CreationWizard {
    /// Start a fresh wizard with the greeting and the first question
    pub fn new() -> Self {
        Self {
            state: WizardState::default(),
            transcript: vec![
                WizardMessage::bot(GREETING),
                WizardMessage::step_prompt(WizardStep::AskSkin),
            ],
            pending: None,
            checkpoint: None,
        }
    }

    /// Rebuild a wizard from stored progress; the transcript restarts at
    /// the current question.
    pub fn resume(state: WizardState) -> Self {
        let transcript = vec![WizardMessage::step_prompt(state.step)];
        Self {
            state,
            transcript,
            pending: None,
            checkpoint: None,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.state.step
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn transcript(&self) -> &[WizardMessage] {
        &self.transcript
    }

    pub fn is_finished(&self) -> bool {
        self.state.step.is_terminal()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn current_options(&self) -> &'static [WizardOption] {
        self.state.step.options()
    }

    /// First half of an advancing transition.
    ///
    /// `choice` may be an option's value or its label. The user's label is
    /// appended to the transcript and the attribute is recorded in the state.
    pub fn select(&mut self, choice: &str) -> Result<PendingTransition, ValidationError> {
        self.ensure_accepting_input()?;

        let step = self.state.step;
        let checkpoint = (self.state.clone(), self.transcript.len());
        let option = step
            .options()
            .iter()
            .find(|o| o.matches(choice))
            .ok_or_else(|| ValidationError::UnknownOption {
                step: step.as_str(),
                value: choice.to_string(),
            })?;

        let value = option.value.to_string();
        let commit = match step {
            WizardStep::AskSkin => {
                self.state.skin_color = Some(value.clone());
                AttributeCommit::SkinColor(value)
            }
            WizardStep::AskHair => {
                self.state.hair_style = Some(value.clone());
                AttributeCommit::HairStyle(value)
            }
            WizardStep::AskOutfit => {
                self.state.outfit = Some(value.clone());
                AttributeCommit::Outfit(value)
            }
            WizardStep::Done => return Err(ValidationError::WizardFinished),
        };

        self.transcript.push(WizardMessage::user(option.label));

        let transition = PendingTransition {
            from: step,
            to: step.next(),
            commit,
        };
        self.pending = Some(transition.clone());
        self.checkpoint = Some(checkpoint);
        Ok(transition)
    }

    /// Second half of an advancing transition: show the next question and
    /// advance. Returns the new step, or `None` when nothing was pending.
    pub fn complete_transition(&mut self) -> Option<WizardStep> {
        let transition = self.pending.take()?;
        self.checkpoint = None;
        self.transcript.push(WizardMessage::step_prompt(transition.to));
        self.state.step = transition.to;
        Some(transition.to)
    }

    /// Undo a pending selection: the recorded attribute and the echoed
    /// label are removed and the current question accepts input again.
    /// Returns the discarded transition, or `None` when nothing was pending.
    pub fn abort_transition(&mut self) -> Option<PendingTransition> {
        let transition = self.pending.take()?;
        if let Some((state, len)) = self.checkpoint.take() {
            self.state = state;
            self.transcript.truncate(len);
        }
        Some(transition)
    }

    /// Record free text. It never advances the wizard.
    pub fn submit_text(&mut self, text: &str) -> Result<(), ValidationError> {
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyInput("message"));
        }
        self.ensure_accepting_input()?;
        self.transcript.push(WizardMessage::user(text));
        Ok(())
    }

    /// Bot reply to free text
    pub fn remind(&mut self) {
        self.transcript.push(WizardMessage::bot(FREE_TEXT_REMINDER));
    }

    fn ensure_accepting_input(&self) -> Result<(), ValidationError> {
        if self.state.step.is_terminal() {
            return Err(ValidationError::WizardFinished);
        }
        if let Some(pending) = &self.pending {
            return Err(ValidationError::TransitionPending {
                step: pending.from.as_str(),
            });
        }
        Ok(())
    }
}

impl Default for CreationWizard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn advance(wizard: &mut CreationWizard, choice: &str) -> PendingTransition {
        let t = wizard.select(choice).unwrap();
        wizard.complete_transition();
        t
    }

    #[test]
    fn test_opening_transcript() {
        let wizard = CreationWizard::new();
        assert_eq!(wizard.step().index(), 0);
        assert_eq!(wizard.transcript().len(), 2);
        assert_eq!(wizard.transcript()[0].text, GREETING);
        assert_eq!(wizard.transcript()[1].options.len(), 3);
    }

    #[test]
    fn test_dark_selects_skin_color_and_moves_to_hair() {
        let mut wizard = CreationWizard::new();
        let t = wizard.select("Dark").unwrap();
        assert_eq!(t.commit, AttributeCommit::SkinColor("#8D5524".into()));
        assert_eq!(t.to, WizardStep::AskHair);
        // step only moves once the transition completes
        assert_eq!(wizard.step(), WizardStep::AskSkin);
        assert_eq!(wizard.transcript().last().unwrap().text, "Dark");

        assert_eq!(wizard.complete_transition(), Some(WizardStep::AskHair));
        assert_eq!(wizard.step().index(), 1);
        assert_eq!(wizard.state().skin_color.as_deref(), Some("#8D5524"));
        assert_eq!(
            wizard.transcript().last().unwrap().text,
            WizardStep::AskHair.prompt()
        );
    }

    #[test]
    fn test_three_selections_finish() {
        let mut wizard = CreationWizard::new();
        advance(&mut wizard, "#E0AC69");
        advance(&mut wizard, "curly");
        let last = advance(&mut wizard, "Sporty");

        assert_eq!(last.to, WizardStep::Done);
        assert!(wizard.is_finished());
        assert_eq!(wizard.step().index(), 3);
        assert_eq!(
            wizard.state(),
            &WizardState {
                step: WizardStep::Done,
                skin_color: Some("#E0AC69".into()),
                hair_style: Some("curly".into()),
                outfit: Some("sporty".into()),
            }
        );
        assert_eq!(wizard.transcript().last().unwrap().text, WizardStep::Done.prompt());
        assert_eq!(wizard.select("Casual"), Err(ValidationError::WizardFinished));
    }

    #[test]
    fn test_free_text_does_not_advance() {
        let mut wizard = CreationWizard::new();
        wizard.submit_text("make her cool").unwrap();
        wizard.remind();
        assert_eq!(wizard.step().index(), 0);
        let texts: Vec<_> = wizard.transcript().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(&texts[2..], &["make her cool", FREE_TEXT_REMINDER]);
        assert!(wizard.submit_text("   ").unwrap_err().is_empty_input());
    }

    #[test]
    fn test_unknown_option_rejected() {
        let mut wizard = CreationWizard::new();
        let err = wizard.select("Short").unwrap_err();
        assert!(matches!(err, ValidationError::UnknownOption { step: "ask_skin", .. }));
        assert!(!wizard.is_pending());
    }

    #[test]
    fn test_input_rejected_while_pending() {
        let mut wizard = CreationWizard::new();
        wizard.select("Pale").unwrap();
        assert_eq!(
            wizard.select("Tan"),
            Err(ValidationError::TransitionPending { step: "ask_skin" })
        );
        assert!(wizard.submit_text("hello").is_err());
        assert_eq!(wizard.state().skin_color.as_deref(), Some("#F0D5B1"));
        assert_eq!(wizard.complete_transition(), Some(WizardStep::AskHair));
        assert_eq!(wizard.complete_transition(), None);
    }

    #[test]
    fn test_abort_transition_restores_question() {
        let mut wizard = CreationWizard::new();
        let opening = wizard.transcript().to_vec();
        assert_eq!(wizard.abort_transition(), None);

        let transition = wizard.select("Dark").unwrap();
        assert_eq!(wizard.abort_transition(), Some(transition));
        assert!(!wizard.is_pending());
        assert_eq!(wizard.step(), WizardStep::AskSkin);
        assert_eq!(wizard.state().skin_color, None);
        assert_eq!(wizard.transcript(), opening.as_slice());
        assert_eq!(wizard.complete_transition(), None);

        advance(&mut wizard, "Dark");
        assert_eq!(wizard.step(), WizardStep::AskHair);
        assert_eq!(wizard.state().skin_color.as_deref(), Some("#8D5524"));
    }

    #[test]
    fn test_commit_applies_to_attributes() {
        let mut attributes = AvatarAttributes::default();
        AttributeCommit::HairStyle("curly".into()).apply_to(&mut attributes);
        AttributeCommit::SkinColor("#8D5524".into()).apply_to(&mut attributes);
        assert_eq!(attributes.hair_style, "curly");
        assert_eq!(attributes.skin_color, "#8D5524");
        assert_eq!(attributes.outfit, "casual");
    }

    #[test]
    fn test_resume_from_state() {
        let state = WizardState {
            step: WizardStep::AskOutfit,
            skin_color: Some("#F0D5B1".into()),
            hair_style: Some("long".into()),
            outfit: None,
        };
        let mut wizard = CreationWizard::resume(state);
        assert_eq!(wizard.transcript().len(), 1);
        assert_eq!(wizard.current_options()[1].value, "formal");
        advance(&mut wizard, "formal");
        assert!(wizard.is_finished());
    }
}

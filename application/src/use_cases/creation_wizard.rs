//! Creation Wizard use case.
//!
//! Drives the [`CreationWizard`] state machine with UI pacing: each answer is
//! echoed immediately, the next question follows after
//! [`WizardPacing::step_delay`], and once the last question is answered the
//! session is marked `created` after [`WizardPacing::completion_delay`].
//!
//! Attribute commits and wizard progress are written through the session
//! store as they happen.

use crate::config::WizardPacing;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::session_store::{SessionStore, SessionStoreError};
use crate::use_cases::shared::InFlightGuard;
use companion_domain::{CreationWizard, ValidationError, WizardMessage, WizardStep};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum WizardError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("The wizard is still responding")]
    Busy,

    #[error("No creation wizard in progress")]
    NotStarted,

    #[error("Session store error: {0}")]
    Store(#[from] SessionStoreError),
}

/// What one wizard interaction produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardProgress {
    pub step: WizardStep,
    /// Messages added by this interaction, in order
    pub messages: Vec<WizardMessage>,
    /// The wizard finished and the companion is created
    pub created: bool,
}

pub struct CreationWizardUseCase {
    store: Arc<dyn SessionStore>,
    pacing: WizardPacing,
    guard: InFlightGuard,
    wizard: Mutex<Option<CreationWizard>>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl CreationWizardUseCase {
    pub fn new(store: Arc<dyn SessionStore>, pacing: WizardPacing) -> Self {
        Self {
            store,
            pacing,
            guard: InFlightGuard::new(),
            wizard: Mutex::new(None),
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Begin (or restart) onboarding.
    pub async fn start(&self) -> Result<WizardProgress, WizardError> {
        let _permit = self.guard.try_enter().ok_or(WizardError::Busy)?;

        let wizard = CreationWizard::new();
        let state = wizard.state().clone();
        self.store
            .update(Box::new(move |s| {
                s.wizard = Some(state);
                s.created = false;
            }))
            .await?;
        info!("Creation wizard started");

        let progress = WizardProgress {
            step: wizard.step(),
            messages: wizard.transcript().to_vec(),
            created: false,
        };
        *self.wizard.lock().await = Some(wizard);
        Ok(progress)
    }

    /// Answer the current question with an option value or label.
    pub async fn select(&self, choice: &str) -> Result<WizardProgress, WizardError> {
        let _permit = self.guard.try_enter().ok_or(WizardError::Busy)?;
        let mut slot = self.wizard.lock().await;
        self.ensure_loaded(&mut slot).await?;
        let Some(wizard) = slot.as_mut() else {
            return Err(WizardError::NotStarted);
        };

        let before = wizard.transcript().len();
        let transition = wizard.select(choice)?;

        let commit = transition.commit.clone();
        let state = wizard.state().clone();
        let committed = self
            .store
            .update(Box::new(move |s| {
                commit.apply_to(&mut s.attributes);
                s.wizard = Some(state);
            }))
            .await;
        if let Err(e) = committed {
            warn!("Wizard answer not saved, question stays open: {}", e);
            wizard.abort_transition();
            return Err(e.into());
        }

        debug!(
            "Wizard {} -> {}: {}",
            transition.from,
            transition.to,
            transition.commit.value()
        );
        self.conversation_logger.log(ConversationEvent::new(
            "wizard_transition",
            serde_json::json!({
                "from": transition.from.as_str(),
                "to": transition.to.as_str(),
                "value": transition.commit.value(),
            }),
        ));

        tokio::time::sleep(self.pacing.step_delay).await;
        wizard.complete_transition();
        if let Err(e) = self.store.set_wizard(Some(wizard.state().clone())).await {
            // Reload from the store on the next call
            *slot = None;
            return Err(e.into());
        }

        let messages = wizard.transcript()[before..].to_vec();
        let step = wizard.step();

        let created = wizard.is_finished();
        if created {
            tokio::time::sleep(self.pacing.completion_delay).await;
            *slot = None;
            self.store
                .update(Box::new(|s| {
                    s.wizard = None;
                    s.created = true;
                }))
                .await?;
            info!("Creation wizard finished, companion created");
        }

        Ok(WizardProgress {
            step,
            messages,
            created,
        })
    }

    /// Free text: echoed, then a reminder to pick an option. Never advances.
    pub async fn say(&self, text: &str) -> Result<WizardProgress, WizardError> {
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyInput("message").into());
        }
        let _permit = self.guard.try_enter().ok_or(WizardError::Busy)?;
        let mut slot = self.wizard.lock().await;
        self.ensure_loaded(&mut slot).await?;
        let Some(wizard) = slot.as_mut() else {
            return Err(WizardError::NotStarted);
        };

        let before = wizard.transcript().len();
        wizard.submit_text(text)?;
        tokio::time::sleep(self.pacing.step_delay).await;
        wizard.remind();

        Ok(WizardProgress {
            step: wizard.step(),
            messages: wizard.transcript()[before..].to_vec(),
            created: false,
        })
    }

    /// Current question and its options, if onboarding is in progress.
    pub async fn current(&self) -> Result<Option<WizardProgress>, WizardError> {
        let mut slot = self.wizard.lock().await;
        match self.ensure_loaded(&mut slot).await {
            Ok(()) => {}
            Err(WizardError::NotStarted) => return Ok(None),
            Err(e) => return Err(e),
        }
        Ok(slot.as_ref().map(|wizard| WizardProgress {
            step: wizard.step(),
            messages: wizard.transcript().to_vec(),
            created: false,
        }))
    }

    /// Resume from the store when this process has no wizard in memory
    async fn ensure_loaded(&self, slot: &mut Option<CreationWizard>) -> Result<(), WizardError> {
        if slot.is_some() {
            return Ok(());
        }
        let session = self.store.load().await?;
        match session.wizard {
            Some(state) => {
                *slot = Some(CreationWizard::resume(state));
                Ok(())
            }
            None if session.created => Err(ValidationError::WizardFinished.into()),
            None => Err(WizardError::NotStarted),
        }
    }
}

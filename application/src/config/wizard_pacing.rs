//! Creation wizard pacing.

use std::time::Duration;

/// Delays inserted between wizard messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WizardPacing {
    /// Between a user answer and the next question
    pub step_delay: Duration,
    /// Between the final message and the `created` flag
    pub completion_delay: Duration,
}

impl Default for WizardPacing {
    fn default() -> Self {
        Self {
            step_delay: Duration::from_millis(500),
            completion_delay: Duration::from_millis(1500),
        }
    }
}

impl WizardPacing {
    pub fn from_millis(step_ms: u64, completion_ms: u64) -> Self {
        Self {
            step_delay: Duration::from_millis(step_ms),
            completion_delay: Duration::from_millis(completion_ms),
        }
    }

    /// No delays at all
    pub fn immediate() -> Self {
        Self::from_millis(0, 0)
    }
}

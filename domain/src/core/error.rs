//! Domain error types

use thiserror::Error;

/// Caller-side validation errors.
///
/// These are raised before any remote call is made, so they never leave
/// session state partially updated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Input must not be empty: {0}")]
    EmptyInput(&'static str),

    #[error("At most {max} interests can be selected (got {got})")]
    TooManyInterests { max: usize, got: usize },

    #[error("Unknown option '{value}' for step '{step}'")]
    UnknownOption { step: &'static str, value: String },

    #[error("Creation wizard has already finished")]
    WizardFinished,

    #[error("A transition from step '{step}' is still in progress")]
    TransitionPending { step: &'static str },
}

impl ValidationError {
    /// Check if this error represents an empty-input rejection
    pub fn is_empty_input(&self) -> bool {
        matches!(self, ValidationError::EmptyInput(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_display() {
        let error = ValidationError::EmptyInput("message");
        assert_eq!(error.to_string(), "Input must not be empty: message");
    }

    #[test]
    fn test_is_empty_input_check() {
        assert!(ValidationError::EmptyInput("prompt").is_empty_input());
        assert!(!ValidationError::WizardFinished.is_empty_input());
        assert!(
            !ValidationError::TooManyInterests { max: 3, got: 4 }.is_empty_input()
        );
    }
}

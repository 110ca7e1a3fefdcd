//! Application-level configuration.
//!
//! Parameter types that control how use cases behave:
//!
//! - [`ModelCascade`]: image models tried in order
//! - [`ConversationParams`]: chat model, reply language, failure text
//! - [`WizardPacing`]: delays in the creation wizard
//! - [`PollPolicy`]: bounded polling for talking-head jobs

pub mod conversation_params;
pub mod model_cascade;
pub mod poll_policy;
pub mod wizard_pacing;

pub use conversation_params::ConversationParams;
pub use model_cascade::ModelCascade;
pub use poll_policy::PollPolicy;
pub use wizard_pacing::WizardPacing;

//! Application layer for companion-studio
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{ConversationParams, ModelCascade, PollPolicy, WizardPacing};
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    post_processor::{ImagePostProcessor, PassthroughPostProcessor},
    prediction::{Prediction, PredictionGateway, PredictionStatus, TalkingHeadRequest},
    remote_service::{
        ChatGateway, ImageGenerationGateway, InlineImage, RemoteServiceError, VisionGateway,
    },
    session_store::{SessionStore, SessionStoreError},
};
pub use use_cases::analyze_image::{ANALYSIS_FALLBACK, AnalyzeImageUseCase};
pub use use_cases::avatar_studio::{AvatarStudioError, AvatarStudioUseCase, StudioOutcome};
pub use use_cases::chat_session::{ChatSessionError, ChatSessionUseCase};
pub use use_cases::converse::{ConversationReply, ConverseUseCase};
pub use use_cases::creation_wizard::{CreationWizardUseCase, WizardError, WizardProgress};
pub use use_cases::generate_avatar::GenerateAvatarUseCase;
pub use use_cases::shared::InFlightGuard;
pub use use_cases::talking_head::{TalkingHeadError, TalkingHeadUseCase};

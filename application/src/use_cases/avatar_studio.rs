//! Avatar Studio use case.
//!
//! The generation workflow around [`GenerateAvatarUseCase`]:
//!
//! 1. Take the in-flight slot (a second request is refused with `Busy`)
//! 2. Build the candidate prompt (append a modifier, or seed from a photo)
//! 3. Run the model cascade
//! 4. On success: post-process, then commit avatar and prompt together
//!
//! A failed generation leaves the stored prompt and avatar untouched.

use crate::ports::conversation_logger::ConversationLogger;
use crate::ports::post_processor::{ImagePostProcessor, PassthroughPostProcessor};
use crate::ports::remote_service::{InlineImage, RemoteServiceError};
use crate::ports::session_store::{SessionStore, SessionStoreError};
use crate::use_cases::analyze_image::AnalyzeImageUseCase;
use crate::use_cases::generate_avatar::GenerateAvatarUseCase;
use crate::use_cases::shared::InFlightGuard;
use companion_domain::{
    AvatarReference, GenerationRequest, GenerationResult, PersonaPrompt, ValidationError,
    find_preset,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum AvatarStudioError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("A generation is already in progress")]
    Busy,

    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    #[error("Image analysis failed: {0}")]
    Analysis(#[from] RemoteServiceError),

    #[error("Session store error: {0}")]
    Store(#[from] SessionStoreError),
}

/// What a generation attempt produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudioOutcome {
    /// Prompt the attempt was made with; committed only on success
    pub prompt: PersonaPrompt,
    /// Success carries the post-processed image reference
    pub result: GenerationResult,
}

pub struct AvatarStudioUseCase {
    store: Arc<dyn SessionStore>,
    generator: GenerateAvatarUseCase,
    analyzer: AnalyzeImageUseCase,
    post_processor: Arc<dyn ImagePostProcessor>,
    guard: InFlightGuard,
}

impl AvatarStudioUseCase {
    pub fn new(
        store: Arc<dyn SessionStore>,
        generator: GenerateAvatarUseCase,
        analyzer: AnalyzeImageUseCase,
    ) -> Self {
        Self {
            store,
            generator,
            analyzer,
            post_processor: Arc::new(PassthroughPostProcessor::default()),
            guard: InFlightGuard::new(),
        }
    }

    pub fn with_post_processor(mut self, processor: Arc<dyn ImagePostProcessor>) -> Self {
        self.post_processor = processor;
        self
    }

    /// Share the in-flight slot with another workflow
    pub fn with_guard(mut self, guard: InFlightGuard) -> Self {
        self.guard = guard;
        self
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.generator = self.generator.with_conversation_logger(logger.clone());
        self.analyzer = self.analyzer.with_conversation_logger(logger);
        self
    }

    /// Append `modifier` to the stored prompt and generate.
    pub async fn customize(&self, modifier: &str) -> Result<StudioOutcome, AvatarStudioError> {
        if modifier.trim().is_empty() {
            return Err(ValidationError::EmptyInput("modifier").into());
        }
        let _permit = self.guard.try_enter().ok_or(AvatarStudioError::Busy)?;

        let candidate = self.store.prompt().await?.appended(modifier);
        self.render(candidate).await
    }

    /// Customize with a built-in preset modifier.
    pub async fn apply_preset(&self, preset_id: &str) -> Result<StudioOutcome, AvatarStudioError> {
        let preset = find_preset(preset_id)
            .ok_or_else(|| AvatarStudioError::UnknownPreset(preset_id.to_string()))?;
        debug!("Applying preset {} ({})", preset.id, preset.prompt);
        self.customize(preset.prompt).await
    }

    /// Generate from the stored prompt as-is.
    pub async fn regenerate(&self) -> Result<StudioOutcome, AvatarStudioError> {
        let _permit = self.guard.try_enter().ok_or(AvatarStudioError::Busy)?;

        let candidate = self.store.prompt().await?;
        self.render(candidate).await
    }

    /// Describe an uploaded photo and generate an avatar from it.
    ///
    /// An analysis failure aborts before any generation call.
    pub async fn from_photo(&self, image: &InlineImage) -> Result<StudioOutcome, AvatarStudioError> {
        let _permit = self.guard.try_enter().ok_or(AvatarStudioError::Busy)?;

        let description = self.analyzer.execute(image).await?;
        let candidate = PersonaPrompt::from_reference_photo(&description);
        self.render(candidate).await
    }

    async fn render(&self, candidate: PersonaPrompt) -> Result<StudioOutcome, AvatarStudioError> {
        let request = GenerationRequest::new(candidate.current());

        let result = match self.generator.execute(&request).await {
            GenerationResult::Success {
                image_uri,
                model_used,
            } => {
                let processed = self.post_processor.process(&image_uri).await;
                self.store
                    .commit_generation(AvatarReference::new(processed.clone()), candidate.clone())
                    .await?;
                info!("Avatar committed (model: {})", model_used);
                GenerationResult::Success {
                    image_uri: processed,
                    model_used,
                }
            }
            failure => failure,
        };

        Ok(StudioOutcome {
            prompt: candidate,
            result,
        })
    }
}

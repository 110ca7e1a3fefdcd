//! Generate Avatar use case.
//!
//! Wraps the persona prompt in the avatar template and runs it through the
//! [`ModelCascade`]: the primary model first, the fallback once if the
//! primary fails. Errors are absorbed into [`GenerationResult::Failure`].

use crate::config::ModelCascade;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::remote_service::{ImageGenerationGateway, RemoteServiceError};
use companion_domain::util::preview;
use companion_domain::{GenerationRequest, GenerationResult, PromptTemplate};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Use case for generating one avatar image
pub struct GenerateAvatarUseCase {
    gateway: Arc<dyn ImageGenerationGateway>,
    cascade: ModelCascade,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl GenerateAvatarUseCase {
    pub fn new(gateway: Arc<dyn ImageGenerationGateway>, cascade: ModelCascade) -> Self {
        Self {
            gateway,
            cascade,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn cascade(&self) -> &ModelCascade {
        &self.cascade
    }

    pub async fn execute(&self, request: &GenerationRequest) -> GenerationResult {
        let wrapped = PromptTemplate::avatar_image(request.prompt());
        info!("Generating avatar: {}", preview(request.prompt(), 100));

        let mut last_error: Option<RemoteServiceError> = None;

        for model in self.cascade.models() {
            debug!("Trying image model {}", model);

            match self.gateway.generate_image(model, &wrapped).await {
                Ok(image) => {
                    let image_uri = image.to_data_uri();
                    info!("Avatar generated with {}", model);

                    self.conversation_logger.log(ConversationEvent::new(
                        "avatar_generated",
                        serde_json::json!({
                            "model": model.to_string(),
                            "prompt": request.prompt(),
                            "mime_type": image.mime_type,
                            "bytes": image.data.len(),
                        }),
                    ));

                    return GenerationResult::Success {
                        image_uri,
                        model_used: model.clone(),
                    };
                }
                Err(e) => {
                    warn!("Image model {} failed: {}", model, e);
                    last_error = Some(e);
                }
            }
        }

        let error_message = format!(
            "All models failed. Last error: {}",
            last_error.map(|e| e.to_string()).unwrap_or_default()
        );

        self.conversation_logger.log(ConversationEvent::new(
            "avatar_generation_failed",
            serde_json::json!({
                "prompt": request.prompt(),
                "error": error_message,
            }),
        ));

        GenerationResult::Failure { error_message }
    }
}

//! Talking Head use case.
//!
//! Animates the avatar image with an audio clip through a remote prediction
//! job, polling at a fixed interval for at most
//! [`PollPolicy::max_attempts`] status checks.

use crate::config::PollPolicy;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::prediction::{PredictionGateway, PredictionStatus, TalkingHeadRequest};
use crate::ports::remote_service::RemoteServiceError;
use companion_domain::ValidationError;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum TalkingHeadError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Remote(#[from] RemoteServiceError),

    #[error("Prediction failed: {0}")]
    PredictionFailed(String),

    #[error("Prediction was canceled")]
    Canceled,

    #[error("Prediction succeeded without output")]
    MissingOutput,

    #[error("Prediction {id} still running after {attempts} status checks")]
    PollLimitExceeded { id: String, attempts: u32 },
}

pub struct TalkingHeadUseCase {
    gateway: Arc<dyn PredictionGateway>,
    policy: PollPolicy,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl TalkingHeadUseCase {
    pub fn new(gateway: Arc<dyn PredictionGateway>, policy: PollPolicy) -> Self {
        Self {
            gateway,
            policy,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Render a video of `image_uri` speaking `audio_uri`; returns the video URI.
    pub async fn render(&self, image_uri: &str, audio_uri: &str) -> Result<String, TalkingHeadError> {
        if image_uri.trim().is_empty() {
            return Err(ValidationError::EmptyInput("image").into());
        }
        if audio_uri.trim().is_empty() {
            return Err(ValidationError::EmptyInput("audio").into());
        }

        let request = TalkingHeadRequest {
            source_image: image_uri.to_string(),
            driven_audio: audio_uri.to_string(),
        };
        let mut prediction = self.gateway.create(&request).await?;
        info!("Talking-head prediction {} created", prediction.id);

        let mut attempts = 0;
        while !prediction.status.is_terminal() {
            if attempts >= self.policy.max_attempts {
                warn!(
                    "Prediction {} not finished after {} checks",
                    prediction.id, attempts
                );
                return Err(TalkingHeadError::PollLimitExceeded {
                    id: prediction.id,
                    attempts,
                });
            }
            tokio::time::sleep(self.policy.interval).await;
            attempts += 1;
            prediction = self.gateway.fetch(&prediction.id).await?;
            debug!(
                "Prediction {} status {:?} (check {}/{})",
                prediction.id, prediction.status, attempts, self.policy.max_attempts
            );
        }

        match prediction.status {
            PredictionStatus::Succeeded => {
                let video = prediction.output.ok_or(TalkingHeadError::MissingOutput)?;
                info!("Talking-head video ready after {} checks", attempts);
                self.conversation_logger.log(ConversationEvent::new(
                    "talking_head_ready",
                    serde_json::json!({
                        "prediction_id": prediction.id,
                        "video": video,
                        "checks": attempts,
                    }),
                ));
                Ok(video)
            }
            PredictionStatus::Canceled => Err(TalkingHeadError::Canceled),
            _ => Err(TalkingHeadError::PredictionFailed(
                prediction
                    .error
                    .unwrap_or_else(|| "unknown error".to_string()),
            )),
        }
    }
}

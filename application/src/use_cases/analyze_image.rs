//! Analyze Image use case.
//!
//! Turns an uploaded photo into a textual appearance description that can
//! seed the persona prompt.

use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::remote_service::{InlineImage, RemoteServiceError, VisionGateway};
use companion_domain::util::preview;
use companion_domain::{Model, PromptTemplate};
use std::sync::Arc;
use tracing::{info, warn};

/// Description used when the vision model answers without any text
pub const ANALYSIS_FALLBACK: &str = "A character from uploaded image";

pub struct AnalyzeImageUseCase {
    gateway: Arc<dyn VisionGateway>,
    model: Model,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl AnalyzeImageUseCase {
    pub fn new(gateway: Arc<dyn VisionGateway>, model: Model) -> Self {
        Self {
            gateway,
            model,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Describe the person or character in `image`.
    ///
    /// Remote failures are returned as-is. The text is returned verbatim; a
    /// successful call with no text or an empty one yields [`ANALYSIS_FALLBACK`].
    pub async fn execute(&self, image: &InlineImage) -> Result<String, RemoteServiceError> {
        info!("Analyzing {} image with {}", image.mime_type, self.model);

        let answer = self
            .gateway
            .describe_image(&self.model, PromptTemplate::image_analysis(), image)
            .await?;

        let description = match answer {
            Some(text) if !text.is_empty() => text,
            _ => {
                warn!("Vision model returned no description, using fallback");
                ANALYSIS_FALLBACK.to_string()
            }
        };

        info!("Image analyzed: {}", preview(&description, 80));
        self.conversation_logger.log(ConversationEvent::new(
            "image_analyzed",
            serde_json::json!({
                "model": self.model.to_string(),
                "description": description,
            }),
        ));

        Ok(description)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    // ==================== Test Mocks ====================

    pub(crate) struct MockVisionGateway {
        responses: Mutex<VecDeque<Result<Option<String>, RemoteServiceError>>>,
        pub(crate) instructions: Mutex<Vec<String>>,
    }

    impl MockVisionGateway {
        pub(crate) fn new(responses: Vec<Result<Option<String>, RemoteServiceError>>) -> Self {
            Self {
                responses: Mutex::new(VecDeque::from(responses)),
                instructions: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl VisionGateway for MockVisionGateway {
        async fn describe_image(
            &self,
            _model: &Model,
            instruction: &str,
            _image: &InlineImage,
        ) -> Result<Option<String>, RemoteServiceError> {
            self.instructions.lock().unwrap().push(instruction.to_string());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(RemoteServiceError::Api("No more responses".into())))
        }
    }

    fn photo() -> InlineImage {
        InlineImage::new("image/jpeg", "/9j/4AAQ")
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_description_returned() {
        let gateway = Arc::new(MockVisionGateway::new(vec![Ok(Some(
            "  Short black hair, round glasses.\n".into(),
        ))]));
        let use_case = AnalyzeImageUseCase::new(gateway.clone(), Model::default_vision());

        let description = use_case.execute(&photo()).await.unwrap();

        assert_eq!(description, "  Short black hair, round glasses.\n");
        let instructions = gateway.instructions.lock().unwrap();
        assert!(instructions[0].starts_with("Describe the physical appearance"));
    }

    #[tokio::test]
    async fn test_whitespace_description_kept() {
        let gateway = Arc::new(MockVisionGateway::new(vec![
            Ok(Some(" ".into())),
            Ok(Some(String::new())),
        ]));
        let use_case = AnalyzeImageUseCase::new(gateway, Model::default_vision());

        assert_eq!(use_case.execute(&photo()).await.unwrap(), " ");
        assert_eq!(use_case.execute(&photo()).await.unwrap(), ANALYSIS_FALLBACK);
    }

    #[tokio::test]
    async fn test_missing_text_uses_fallback() {
        let gateway = Arc::new(MockVisionGateway::new(vec![Ok(None)]));
        let use_case = AnalyzeImageUseCase::new(gateway, Model::default_vision());

        assert_eq!(use_case.execute(&photo()).await.unwrap(), ANALYSIS_FALLBACK);
    }

    #[tokio::test]
    async fn test_remote_failure_surfaces() {
        let gateway = Arc::new(MockVisionGateway::new(vec![Err(
            RemoteServiceError::Status {
                code: 400,
                message: "bad image".into(),
            },
        )]));
        let use_case = AnalyzeImageUseCase::new(gateway, Model::default_vision());

        let err = use_case.execute(&photo()).await.unwrap_err();
        assert!(matches!(err, RemoteServiceError::Status { code: 400, .. }));
    }
}

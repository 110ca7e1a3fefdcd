//! Dependency wiring: config sections to adapters to use cases

use anyhow::{Context, Result};
use companion_application::{
    AnalyzeImageUseCase, AvatarStudioUseCase, ChatSessionUseCase, ConversationLogger,
    ConverseUseCase, CreationWizardUseCase, GenerateAvatarUseCase, NoConversationLogger,
    PassthroughPostProcessor, SessionStore, TalkingHeadUseCase,
};
use companion_infrastructure::{
    FileConfig, GeminiClient, JsonFileSessionStore, JsonlConversationLogger,
    ReplicatePredictionGateway,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Shared handles for one CLI invocation
pub struct App {
    config: FileConfig,
    store: Arc<dyn SessionStore>,
    logger: Arc<dyn ConversationLogger>,
}

impl App {
    pub fn new(config: FileConfig, session_path: &Path, conversation_log: Option<PathBuf>) -> Self {
        debug!("Session file: {}", session_path.display());
        let store: Arc<dyn SessionStore> = Arc::new(JsonFileSessionStore::new(session_path));

        let log_path = conversation_log.or_else(|| config.logging.conversation_log.clone());
        let logger: Arc<dyn ConversationLogger> =
            match log_path.and_then(JsonlConversationLogger::new) {
                Some(logger) => {
                    info!("Session events -> {}", logger.path().display());
                    Arc::new(logger)
                }
                None => Arc::new(NoConversationLogger),
            };

        Self {
            config,
            store,
            logger,
        }
    }

    pub fn config(&self) -> &FileConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    fn gemini(&self) -> Result<Arc<GeminiClient>> {
        let client = GeminiClient::from_config(&self.config.gemini)
            .context("Gemini client unavailable")?;
        Ok(Arc::new(client))
    }

    pub fn studio(&self) -> Result<AvatarStudioUseCase> {
        let gemini = self.gemini()?;
        let generator = GenerateAvatarUseCase::new(gemini.clone(), self.config.models.cascade());
        let analyzer = AnalyzeImageUseCase::new(gemini, self.config.models.vision_model());
        let post_processor = PassthroughPostProcessor::new(self.config.post_process.delay());

        Ok(AvatarStudioUseCase::new(self.store.clone(), generator, analyzer)
            .with_post_processor(Arc::new(post_processor))
            .with_conversation_logger(self.logger.clone()))
    }

    pub fn chat(&self) -> Result<ChatSessionUseCase> {
        let params = self
            .config
            .conversation
            .params(self.config.models.chat_model());
        let converse = ConverseUseCase::new(self.gemini()?, params)
            .with_conversation_logger(self.logger.clone());

        Ok(ChatSessionUseCase::new(self.store.clone(), converse)
            .with_conversation_logger(self.logger.clone()))
    }

    pub fn wizard(&self) -> CreationWizardUseCase {
        CreationWizardUseCase::new(self.store.clone(), self.config.wizard.pacing())
            .with_conversation_logger(self.logger.clone())
    }

    pub fn talking_head(&self) -> Result<TalkingHeadUseCase> {
        let talking_head = &self.config.talking_head;
        let gateway =
            ReplicatePredictionGateway::from_config(talking_head, self.config.gemini.timeout())
                .context("Talking-head service unavailable")?;

        Ok(
            TalkingHeadUseCase::new(Arc::new(gateway), talking_head.poll_policy())
                .with_conversation_logger(self.logger.clone()),
        )
    }
}

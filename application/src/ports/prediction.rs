//! Prediction port (long-running remote jobs)
//!
//! Used for talking-head video rendering: a job is created, then polled
//! until it reaches a terminal status.

use super::remote_service::RemoteServiceError;
use async_trait::async_trait;

/// Lifecycle of a remote prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionStatus {
    Starting,
    Processing,
    Succeeded,
    Failed,
    Canceled,
}

impl PredictionStatus {
    /// Lenient parse; unknown states count as still processing.
    pub fn parse(s: &str) -> Self {
        match s {
            "starting" => PredictionStatus::Starting,
            "succeeded" => PredictionStatus::Succeeded,
            "failed" => PredictionStatus::Failed,
            "canceled" | "cancelled" => PredictionStatus::Canceled,
            _ => PredictionStatus::Processing,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PredictionStatus::Succeeded | PredictionStatus::Failed | PredictionStatus::Canceled
        )
    }
}

/// Snapshot of a prediction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prediction {
    pub id: String,
    pub status: PredictionStatus,
    /// Result URI once succeeded
    pub output: Option<String>,
    pub error: Option<String>,
}

/// Inputs of a talking-head job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TalkingHeadRequest {
    pub source_image: String,
    pub driven_audio: String,
}

#[async_trait]
pub trait PredictionGateway: Send + Sync {
    async fn create(&self, request: &TalkingHeadRequest) -> Result<Prediction, RemoteServiceError>;

    async fn fetch(&self, id: &str) -> Result<Prediction, RemoteServiceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse() {
        assert_eq!(PredictionStatus::parse("succeeded"), PredictionStatus::Succeeded);
        assert_eq!(PredictionStatus::parse("canceled"), PredictionStatus::Canceled);
        assert_eq!(PredictionStatus::parse("queued"), PredictionStatus::Processing);
        assert!(PredictionStatus::parse("failed").is_terminal());
        assert!(!PredictionStatus::parse("starting").is_terminal());
    }
}

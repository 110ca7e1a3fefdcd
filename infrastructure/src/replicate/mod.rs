//! Replicate predictions adapter (talking-head video)
//!
//! `POST {api_base}/predictions` creates a job (expects `201 Created`),
//! `GET {api_base}/predictions/{id}` reads its status.

use crate::config::FileTalkingHeadConfig;
use async_trait::async_trait;
use companion_application::{
    Prediction, PredictionGateway, PredictionStatus, RemoteServiceError, TalkingHeadRequest,
};
use companion_domain::util::preview;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ReplicateError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Replicate returned HTTP {code}: {detail}")]
    Status { code: u16, detail: String },

    #[error("Invalid JSON payload: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    #[error("API token not set ({0})")]
    MissingToken(String),
}

impl From<ReplicateError> for RemoteServiceError {
    fn from(error: ReplicateError) -> Self {
        match error {
            ReplicateError::Http(e) if e.is_timeout() => RemoteServiceError::Timeout,
            ReplicateError::Http(e) => RemoteServiceError::Transport(e.to_string()),
            ReplicateError::Status { code, detail } => RemoteServiceError::Status {
                code,
                message: detail,
            },
            ReplicateError::InvalidResponse(e) => {
                RemoteServiceError::Transport(format!("invalid JSON payload: {}", e))
            }
            ReplicateError::MissingToken(var) => {
                RemoteServiceError::Configuration(format!("API token not set ({})", var))
            }
        }
    }
}

// ==================== Wire Types ====================

#[derive(Debug, Serialize)]
struct CreatePredictionRequest<'a> {
    version: &'a str,
    input: SadTalkerInput<'a>,
}

#[derive(Debug, Serialize)]
struct SadTalkerInput<'a> {
    source_image: &'a str,
    driven_audio: &'a str,
    preprocess: &'static str,
    still: bool,
    enhancer: &'static str,
}

#[derive(Debug, Deserialize)]
struct PredictionResponse {
    id: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    output: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

impl PredictionResponse {
    fn into_prediction(self) -> Prediction {
        Prediction {
            id: self.id,
            status: PredictionStatus::parse(&self.status),
            output: self.output.as_ref().and_then(output_uri),
            error: self.error.as_ref().and_then(value_text),
        }
    }
}

/// Output is a URI string, or a list whose last entry is the final file
fn output_uri(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Array(items) => items.iter().rev().find_map(output_uri),
        _ => None,
    }
}

fn value_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<String>,
}

// ==================== Client ====================

pub struct ReplicatePredictionGateway {
    http: reqwest::Client,
    api_base: String,
    token: String,
    model_version: String,
}

impl ReplicatePredictionGateway {
    pub fn new(
        api_base: impl Into<String>,
        token: impl Into<String>,
        model_version: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ReplicateError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            api_base: api_base.into().trim().trim_end_matches('/').to_string(),
            token: token.into(),
            model_version: model_version.into(),
        })
    }

    pub fn from_config(
        config: &FileTalkingHeadConfig,
        timeout: Duration,
    ) -> Result<Self, ReplicateError> {
        let token = std::env::var(&config.token_env)
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ReplicateError::MissingToken(config.token_env.clone()))?;
        Self::new(&config.api_base, token, &config.model_version, timeout)
    }

    async fn read_prediction(
        response: reqwest::Response,
        expected: StatusCode,
    ) -> Result<Prediction, ReplicateError> {
        let status = response.status();
        let body = response.text().await?;

        if status != expected {
            let detail = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.detail)
                .unwrap_or_else(|| preview(body.trim(), 512).into_owned());
            return Err(ReplicateError::Status {
                code: status.as_u16(),
                detail,
            });
        }

        let parsed: PredictionResponse = serde_json::from_str(&body)?;
        Ok(parsed.into_prediction())
    }
}

#[async_trait]
impl PredictionGateway for ReplicatePredictionGateway {
    async fn create(&self, request: &TalkingHeadRequest) -> Result<Prediction, RemoteServiceError> {
        let body = CreatePredictionRequest {
            version: &self.model_version,
            input: SadTalkerInput {
                source_image: &request.source_image,
                driven_audio: &request.driven_audio,
                preprocess: "full",
                still: true,
                enhancer: "gfpgan",
            },
        };

        debug!("Creating prediction (version {})", preview(&self.model_version, 12));
        let response = self
            .http
            .post(format!("{}/predictions", self.api_base))
            .header("Authorization", format!("Token {}", self.token))
            .json(&body)
            .send()
            .await
            .map_err(ReplicateError::from)?;

        Ok(Self::read_prediction(response, StatusCode::CREATED).await?)
    }

    async fn fetch(&self, id: &str) -> Result<Prediction, RemoteServiceError> {
        let response = self
            .http
            .get(format!("{}/predictions/{}", self.api_base, id))
            .header("Authorization", format!("Token {}", self.token))
            .send()
            .await
            .map_err(ReplicateError::from)?;

        Ok(Self::read_prediction(response, StatusCode::OK).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_body_shape() {
        let body = CreatePredictionRequest {
            version: "3aa3dac9",
            input: SadTalkerInput {
                source_image: "https://img",
                driven_audio: "https://audio",
                preprocess: "full",
                still: true,
                enhancer: "gfpgan",
            },
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "version": "3aa3dac9",
                "input": {
                    "source_image": "https://img",
                    "driven_audio": "https://audio",
                    "preprocess": "full",
                    "still": true,
                    "enhancer": "gfpgan"
                }
            })
        );
    }

    #[test]
    fn test_prediction_parsing() {
        let response: PredictionResponse = serde_json::from_value(json!({
            "id": "abc",
            "status": "succeeded",
            "output": "https://replicate.delivery/out.mp4",
            "error": null
        }))
        .unwrap();
        let prediction = response.into_prediction();
        assert_eq!(prediction.status, PredictionStatus::Succeeded);
        assert_eq!(
            prediction.output.as_deref(),
            Some("https://replicate.delivery/out.mp4")
        );
        assert!(prediction.error.is_none());
    }

    #[test]
    fn test_list_output_takes_last() {
        assert_eq!(
            output_uri(&json!(["https://a/1.mp4", "https://a/2.mp4"])).as_deref(),
            Some("https://a/2.mp4")
        );
        assert!(output_uri(&json!(42)).is_none());
    }

    #[test]
    fn test_missing_token_is_configuration_error() {
        let config = FileTalkingHeadConfig {
            token_env: "COMPANION_TEST_TOKEN_THAT_IS_NEVER_SET".into(),
            ..FileTalkingHeadConfig::default()
        };
        let err = ReplicatePredictionGateway::from_config(&config, Duration::from_secs(5))
            .err()
            .unwrap();
        let mapped: RemoteServiceError = err.into();
        assert!(matches!(mapped, RemoteServiceError::Configuration(_)));
    }
}

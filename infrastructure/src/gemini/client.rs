//! Gemini HTTP client
//!
//! One `reqwest::Client` with a request timeout, shared by the image, vision
//! and chat ports. Every call is a single `generateContent` request; retries
//! and fallbacks are decided by the application layer.

use super::error::{GeminiError, Result};
use super::protocol::{GenerateContentRequest, GenerateContentResponse, error_message};
use crate::config::FileGeminiConfig;
use async_trait::async_trait;
use companion_application::{
    ChatGateway, ImageGenerationGateway, InlineImage, RemoteServiceError, VisionGateway,
};
use companion_domain::Model;
use companion_domain::util::preview;
use std::time::Duration;
use tracing::debug;

/// Fallback key variable checked after the configured one
const FALLBACK_KEY_ENV: &str = "GOOGLE_API_KEY";

pub struct GeminiClient {
    http: reqwest::Client,
    api_base: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(
        api_base: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            api_base: api_base.into().trim().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// Build from the `[gemini]` config section, reading the key from the
    /// environment.
    pub fn from_config(config: &FileGeminiConfig) -> Result<Self> {
        let api_key = non_empty_env(&config.api_key_env)
            .or_else(|| non_empty_env(FALLBACK_KEY_ENV))
            .ok_or_else(|| {
                GeminiError::MissingApiKey(format!("{}, {}", config.api_key_env, FALLBACK_KEY_ENV))
            })?;
        Self::new(
            &config.api_base,
            api_key,
            Duration::from_secs(config.timeout_seconds),
        )
    }

    fn endpoint(&self, model: &Model) -> String {
        let name = model.as_str().trim();
        let path = if name.starts_with("models/") {
            name.to_string()
        } else {
            format!("models/{}", name)
        };
        format!("{}/{}:generateContent", self.api_base, path)
    }

    async fn generate_content(
        &self,
        model: &Model,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        debug!("POST generateContent ({})", model);

        let response = self
            .http
            .post(self.endpoint(model))
            .query(&[("key", &self.api_key)])
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = error_message(&body).unwrap_or_else(|| {
                let text = preview(body.trim(), 512);
                if text.is_empty() {
                    status.canonical_reason().unwrap_or("request failed").to_string()
                } else {
                    text.into_owned()
                }
            });
            return Err(GeminiError::Status {
                code: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;
        if let Some(error) = parsed.error.as_ref() {
            return Err(GeminiError::Api(error.message.clone()));
        }
        Ok(parsed)
    }
}

#[async_trait]
impl ImageGenerationGateway for GeminiClient {
    async fn generate_image(
        &self,
        model: &Model,
        prompt: &str,
    ) -> std::result::Result<InlineImage, RemoteServiceError> {
        let response = self
            .generate_content(model, &GenerateContentRequest::text(prompt))
            .await?;
        let image = response
            .first_inline_image()
            .ok_or(GeminiError::MissingPayload("inline image"))?;
        Ok(InlineImage::new(&image.mime_type, &image.data))
    }
}

#[async_trait]
impl VisionGateway for GeminiClient {
    async fn describe_image(
        &self,
        model: &Model,
        instruction: &str,
        image: &InlineImage,
    ) -> std::result::Result<Option<String>, RemoteServiceError> {
        let request =
            GenerateContentRequest::text_with_image(instruction, &image.mime_type, &image.data);
        let response = self.generate_content(model, &request).await?;
        Ok(response.first_text().map(str::to_string))
    }
}

#[async_trait]
impl ChatGateway for GeminiClient {
    async fn complete(
        &self,
        model: &Model,
        prompt: &str,
    ) -> std::result::Result<String, RemoteServiceError> {
        let response = self
            .generate_content(model, &GenerateContentRequest::text(prompt))
            .await?;
        let text = response
            .first_text()
            .ok_or(GeminiError::MissingPayload("text"))?;
        Ok(text.to_string())
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    // ==================== Test Server ====================

    /// Serve one canned HTTP response; the handle yields the raw request.
    async fn serve_once(status_line: &str, body: &str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                if request_complete(&request) {
                    break;
                }
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&request).into_owned()
        });

        (format!("http://{}", addr), handle)
    }

    fn request_complete(raw: &[u8]) -> bool {
        let text = String::from_utf8_lossy(raw);
        let Some(header_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let content_length = text[..header_end]
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())?
            })
            .unwrap_or(0);
        raw.len() >= header_end + 4 + content_length
    }

    fn client(base: &str) -> GeminiClient {
        GeminiClient::new(base, "test-key", Duration::from_secs(5)).unwrap()
    }

    // ==================== Tests ====================

    #[test]
    fn test_endpoint() {
        let client = client("https://example.test/v1beta/");
        assert_eq!(
            client.endpoint(&Model::Gemini3ProImage),
            "https://example.test/v1beta/models/gemini-3-pro-image-preview:generateContent"
        );
        assert_eq!(
            client.endpoint(&Model::Custom("models/tuned-1".into())),
            "https://example.test/v1beta/models/tuned-1:generateContent"
        );
    }

    #[tokio::test]
    async fn test_generate_image_success() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"ok"},{"inlineData":{"mimeType":"image/png","data":"iVBOR"}}]}}]}"#;
        let (base, server) = serve_once("200 OK", body).await;

        let image = client(&base)
            .generate_image(&Model::Gemini3ProImage, "draw")
            .await
            .unwrap();

        assert_eq!(image.to_data_uri(), "data:image/png;base64,iVBOR");
        let request = server.await.unwrap();
        assert!(request.starts_with(
            "POST /models/gemini-3-pro-image-preview:generateContent?key=test-key"
        ));
        assert!(request.contains(r#"{"contents":[{"parts":[{"text":"draw"}]}]}"#));
    }

    #[tokio::test]
    async fn test_text_only_response_is_missing_payload() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"I can't draw that"}]}}]}"#;
        let (base, _server) = serve_once("200 OK", body).await;

        let err = client(&base)
            .generate_image(&Model::Gemini25FlashImage, "draw")
            .await
            .unwrap_err();

        assert_eq!(err, RemoteServiceError::MissingPayload("inline image"));
    }

    #[tokio::test]
    async fn test_error_status_uses_api_message() {
        let body = r#"{"error":{"code":429,"message":"Resource exhausted","status":"RESOURCE_EXHAUSTED"}}"#;
        let (base, _server) = serve_once("429 Too Many Requests", body).await;

        let err = client(&base)
            .complete(&Model::Gemini3Pro, "hello")
            .await
            .unwrap_err();

        assert_eq!(
            err,
            RemoteServiceError::Status {
                code: 429,
                message: "Resource exhausted".into()
            }
        );
    }

    #[tokio::test]
    async fn test_error_payload_on_success_status() {
        let body = r#"{"error":{"message":"model not found"}}"#;
        let (base, _server) = serve_once("200 OK", body).await;

        let err = client(&base)
            .complete(&Model::Gemini3Pro, "hello")
            .await
            .unwrap_err();

        assert_eq!(err, RemoteServiceError::Api("model not found".into()));
    }

    #[tokio::test]
    async fn test_vision_without_text_is_none() {
        let (base, server) = serve_once("200 OK", r#"{"candidates":[]}"#).await;
        let image = InlineImage::new("image/jpeg", "/9j/");

        let answer = client(&base)
            .describe_image(&Model::Gemini15Flash, "describe", &image)
            .await
            .unwrap();

        assert!(answer.is_none());
        let request = server.await.unwrap();
        assert!(request.contains(r#""inlineData":{"mimeType":"image/jpeg","data":"/9j/"}"#));
    }
}

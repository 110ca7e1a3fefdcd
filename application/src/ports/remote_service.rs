//! Remote model ports
//!
//! Defines the interfaces for the remote generation, vision and chat
//! capabilities. Adapters live in the infrastructure layer.

use async_trait::async_trait;
use companion_domain::Model;
use thiserror::Error;

/// Errors that can occur when talking to a remote model service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemoteServiceError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("HTTP {code}: {message}")]
    Status { code: u16, message: String },

    #[error("{0}")]
    Api(String),

    #[error("Response contained no {0}")]
    MissingPayload(&'static str),

    #[error("Timeout")]
    Timeout,

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Base64 image payload exchanged with the remote service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    pub mime_type: String,
    /// Base64-encoded bytes
    pub data: String,
}

impl InlineImage {
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Render as a `data:<mime>;base64,<data>` URI
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    /// Parse a base64 data URI back into its parts
    pub fn from_data_uri(uri: &str) -> Option<Self> {
        let rest = uri.strip_prefix("data:")?;
        let (header, data) = rest.split_once(',')?;
        let mime_type = header.strip_suffix(";base64")?;
        Some(Self::new(mime_type, data))
    }
}

/// Text-to-image generation
#[async_trait]
pub trait ImageGenerationGateway: Send + Sync {
    /// Ask `model` for an image. The first inline image part of the
    /// response is returned; a response without one is an error.
    async fn generate_image(
        &self,
        model: &Model,
        prompt: &str,
    ) -> Result<InlineImage, RemoteServiceError>;
}

/// Image description
#[async_trait]
pub trait VisionGateway: Send + Sync {
    /// Returns `Ok(None)` when the call succeeded but carried no text.
    async fn describe_image(
        &self,
        model: &Model,
        instruction: &str,
        image: &InlineImage,
    ) -> Result<Option<String>, RemoteServiceError>;
}

/// Single-shot text completion
#[async_trait]
pub trait ChatGateway: Send + Sync {
    async fn complete(&self, model: &Model, prompt: &str) -> Result<String, RemoteServiceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_uri_round_trip() {
        let image = InlineImage::new("image/png", "iVBORw0KGgo=");
        let uri = image.to_data_uri();
        assert_eq!(uri, "data:image/png;base64,iVBORw0KGgo=");
        assert_eq!(InlineImage::from_data_uri(&uri), Some(image));
    }

    #[test]
    fn test_from_data_uri_rejects_other_schemes() {
        assert!(InlineImage::from_data_uri("https://example.com/a.png").is_none());
        assert!(InlineImage::from_data_uri("data:text/plain,hello").is_none());
    }

    #[test]
    fn test_api_error_displays_message_only() {
        let err = RemoteServiceError::Api("quota exceeded".into());
        assert_eq!(err.to_string(), "quota exceeded");
    }
}

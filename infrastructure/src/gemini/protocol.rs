//! Wire types for the `generateContent` endpoint.
//!
//! Only the fields this adapter reads or writes are modeled. Response
//! parsing accepts both camelCase and snake_case spellings of the inline
//! data fields.

use serde::{Deserialize, Serialize};

/// Request body
#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    /// Single text part
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part::text(prompt)],
            }],
        }
    }

    /// Instruction followed by one inline image
    pub fn text_with_image(
        instruction: impl Into<String>,
        mime_type: impl Into<String>,
        data: impl Into<String>,
    ) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![
                    Part::text(instruction),
                    Part {
                        text: None,
                        inline_data: Some(InlineData {
                            mime_type: mime_type.into(),
                            data: data.into(),
                        }),
                    },
                ],
            }],
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "inline_data")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    #[serde(default = "default_mime_type", alias = "mime_type")]
    pub mime_type: String,
    #[serde(default)]
    pub data: String,
}

fn default_mime_type() -> String {
    "image/png".to_string()
}

/// Response body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub error: Option<ApiError>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}

impl GenerateContentResponse {
    /// Parts of the first candidate; later candidates are never read
    fn first_parts(&self) -> &[Part] {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| c.parts.as_slice())
            .unwrap_or_default()
    }

    /// First inline image with non-empty data in the first candidate
    pub fn first_inline_image(&self) -> Option<&InlineData> {
        self.first_parts()
            .iter()
            .filter_map(|p| p.inline_data.as_ref())
            .find(|d| !d.data.is_empty())
    }

    /// Text of the first part of the first candidate
    pub fn first_text(&self) -> Option<&str> {
        self.first_parts().first().and_then(|p| p.text.as_deref())
    }
}

/// Best-effort `error.message` from an error body
pub fn error_message(body: &str) -> Option<String> {
    let parsed: GenerateContentResponse = serde_json::from_str(body).ok()?;
    parsed
        .error
        .map(|e| e.message)
        .filter(|m| !m.trim().is_empty())
}

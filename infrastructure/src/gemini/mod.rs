//! Gemini `generateContent` adapter
//!
//! Implements the image, vision and chat ports against the Google
//! Generative Language REST API.

pub mod client;
pub mod error;
pub mod protocol;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use companion_application::InlineImage;
use std::path::Path;

/// Read an image file into an inline payload, guessing the mime type from
/// the extension (JPEG when unknown).
pub fn inline_image_from_file(path: &Path) -> std::io::Result<InlineImage> {
    let bytes = std::fs::read(path)?;
    Ok(InlineImage::new(mime_type_for(path), BASE64.encode(bytes)))
}

fn mime_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("heic") => "image/heic",
        _ => "image/jpeg",
    }
}

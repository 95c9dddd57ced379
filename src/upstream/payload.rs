// src/upstream/payload.rs
// Shapes relay input into a generateContent request

use axum::body::Bytes;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use gemchat_types::{
    DEFAULT_IMAGE_PROMPT, FALLBACK_IMAGE_MIME, GenerateContentRequest, InlineData, Part,
};

/// An uploaded image, bytes plus the MIME type sent upstream
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub mime_type: String,
    pub bytes: Bytes,
}

impl ImageUpload {
    /// Detect the MIME type from the declared content type, then the file
    /// name, falling back to JPEG.
    pub fn new(bytes: Bytes, content_type: Option<&str>, file_name: Option<&str>) -> Self {
        Self {
            mime_type: detect_mime(content_type, file_name),
            bytes,
        }
    }
}

fn detect_mime(content_type: Option<&str>, file_name: Option<&str>) -> String {
    if let Some(ct) = content_type.map(str::trim).filter(|ct| ct.starts_with("image/")) {
        return ct.to_string();
    }

    file_name
        .and_then(|name| mime_guess::from_path(name).first())
        .filter(|mime| mime.type_() == mime_guess::mime::IMAGE)
        .map(|mime| mime.essence_str().to_string())
        .unwrap_or_else(|| FALLBACK_IMAGE_MIME.to_string())
}

/// Build the upstream request body.
///
/// With an image: one `inline_data` part followed by one `text` part
/// (default prompt when none given). Without: a single `text` part.
pub fn build_payload(prompt: Option<&str>, image: Option<&ImageUpload>) -> GenerateContentRequest {
    let parts = match image {
        Some(image) => vec![
            Part::InlineData {
                inline_data: InlineData {
                    mime_type: image.mime_type.clone(),
                    data: BASE64.encode(&image.bytes),
                },
            },
            Part::Text {
                text: prompt.unwrap_or(DEFAULT_IMAGE_PROMPT).to_string(),
            },
        ],
        None => vec![Part::Text {
            text: prompt.unwrap_or_default().to_string(),
        }],
    };

    GenerateContentRequest::single(parts)
}

// crates/gemchat-types/src/lib.rs
// Shared wire types for gemchat (native + WASM compatible)
// No native-only dependencies allowed here

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ═══════════════════════════════════════
// ROUTES
// ═══════════════════════════════════════

pub const HEALTH_PATH: &str = "/";
pub const CONFIG_PATH: &str = "/api/config";
pub const GENERATE_PATH: &str = "/api/gemini";

/// Multipart field carrying the prompt text
pub const PROMPT_FIELD: &str = "prompt";
/// Multipart field carrying the image bytes
pub const IMAGE_FIELD: &str = "image";

/// Prompt sent alongside an image when the user typed nothing
pub const DEFAULT_IMAGE_PROMPT: &str = "Describe this image in detail.";

/// MIME type assumed for uploads whose type cannot be detected
pub const FALLBACK_IMAGE_MIME: &str = "image/jpeg";

// ═══════════════════════════════════════
// RELAY API
// ═══════════════════════════════════════

/// JSON body accepted by the generate route
///
/// `prompt` is required by contract, but kept optional here so a missing
/// field surfaces as a "missing input" error rather than a parse failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

impl GenerateRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: Some(prompt.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub message: String,
}

/// Credential echo payload (debug builds of the relay only)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConfigResponse {
    #[serde(rename = "API_KEY")]
    pub api_key: String,
}

/// Error body returned by the relay for every failure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorEnvelope {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrorEnvelope {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<Value>) -> Self {
        self.details = Some(details.into());
        self
    }
}

// ═══════════════════════════════════════
// UPSTREAM (generateContent)
// ═══════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InlineData {
    pub mime_type: String,
    /// Standard base64, no line breaks
    pub data: String,
}

impl GenerateContentRequest {
    /// Single-turn request from a list of parts
    pub fn single(parts: Vec<Part>) -> Self {
        Self {
            contents: vec![Content { parts }],
        }
    }
}

/// The slice of the upstream response the client reads.
/// Unknown fields are ignored; the relay itself never parses this.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// `candidates[0].content.parts[0].text`
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
    }
}

// src/upstream/mod.rs
// Gemini generateContent client

pub mod payload;

pub use payload::{ImageUpload, build_payload};

use async_trait::async_trait;
use axum::body::Bytes;
use gemchat_types::GenerateContentRequest;
use reqwest::Client as HttpClient;
use tracing::{debug, warn};

use crate::error::{RelayError, Result};

/// Something that can answer a generateContent request.
///
/// Implemented by [`GeminiClient`]; tests substitute a recording stub.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Returns the upstream body on success, `RelayError::Upstream` on a
    /// non-success status.
    async fn generate(&self, api_key: &str, payload: &GenerateContentRequest) -> Result<Bytes>;
}

/// HTTPS client for the upstream API. No timeout beyond reqwest's defaults.
pub struct GeminiClient {
    client: HttpClient,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: HttpClient::new(),
            base_url: base_url.into(),
            model: model.into(),
        }
    }

    /// `{base}/v1beta/models/{model}:generateContent`
    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl GenerativeBackend for GeminiClient {
    async fn generate(&self, api_key: &str, payload: &GenerateContentRequest) -> Result<Bytes> {
        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", api_key)])
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    warn!(status = status.as_u16(), error = %e.without_url(), "Failed to read upstream error body");
                    String::new()
                }
            };
            return Err(RelayError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await?;
        debug!(bytes = body.len(), "Upstream reply received");
        Ok(body)
    }
}

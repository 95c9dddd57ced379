// crates/gemchat-client/src/error.rs
// Failures the client turns into error bubbles

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Fetch itself failed (relay unreachable, CORS, aborted)
    #[error("Network error: {0}")]
    Network(String),

    /// Relay answered with a non-success status
    #[error("Request failed ({status}): {message}")]
    Status { status: u16, message: String },

    /// Success status but no `candidates[0].content.parts[0].text`
    #[error("Invalid response from server")]
    InvalidResponse,
}

impl ClientError {
    /// Build a status error from the relay's error body.
    ///
    /// Prefers the envelope's `error` field; falls back to the raw body.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<gemchat_types::ErrorEnvelope>(body)
            .map(|env| env.error)
            .unwrap_or_else(|_| {
                let trimmed = body.trim();
                if trimmed.is_empty() {
                    "no response body".to_string()
                } else {
                    trimmed.to_string()
                }
            });
        ClientError::Status { status, message }
    }
}

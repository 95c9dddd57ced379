// src/error.rs
// Relay error taxonomy and its JSON envelope

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use gemchat_types::ErrorEnvelope;
use serde_json::Value;
use thiserror::Error;
use tracing::{error, warn};

use crate::config::API_KEY_VAR;

#[derive(Error, Debug)]
pub enum RelayError {
    /// Neither a prompt nor an image was supplied
    #[error("Prompt or image is required")]
    MissingInput,

    /// Body could not be read as JSON or multipart. `status` is the
    /// extractor's own (400, 413 over the body limit, 415 wrong media type).
    #[error("Invalid request body ({status}): {reason}")]
    MalformedInput { status: StatusCode, reason: String },

    #[error("Server configuration error: GEMINI_API_KEY is not set")]
    MissingCredential,

    /// Upstream answered with a non-success status
    #[error("Upstream API error ({status})")]
    Upstream { status: u16, body: String },

    #[error("Origin not allowed")]
    OriginNotAllowed,

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Convenience type alias for Result using RelayError
pub type Result<T> = std::result::Result<T, RelayError>;

impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries the credential as a query parameter
        RelayError::Internal(err.without_url().to_string())
    }
}

impl RelayError {
    pub fn malformed(status: StatusCode, reason: impl Into<String>) -> Self {
        RelayError::MalformedInput {
            status,
            reason: reason.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::MissingInput => StatusCode::BAD_REQUEST,
            RelayError::MalformedInput { status, .. } => *status,
            RelayError::OriginNotAllowed => StatusCode::FORBIDDEN,
            RelayError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            RelayError::MissingCredential | RelayError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn envelope(&self) -> ErrorEnvelope {
        match self {
            RelayError::MissingInput => ErrorEnvelope::new(self.to_string()),
            RelayError::MalformedInput { reason, .. } => {
                ErrorEnvelope::new("Invalid request body").with_details(reason.as_str())
            }
            RelayError::MissingCredential => ErrorEnvelope::new("Server configuration error")
                .with_details(format!("{API_KEY_VAR} is not set")),
            RelayError::Upstream { body, .. } => {
                // Embed the upstream body as JSON when it is JSON
                let details = serde_json::from_str::<Value>(body)
                    .unwrap_or_else(|_| Value::String(body.clone()));
                ErrorEnvelope::new("Upstream API error").with_details(details)
            }
            RelayError::OriginNotAllowed => ErrorEnvelope::new(self.to_string()),
            RelayError::Internal(reason) => {
                ErrorEnvelope::new("Internal server error").with_details(reason.as_str())
            }
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            RelayError::Internal(_) | RelayError::MissingCredential => error!("{}", self),
            RelayError::Upstream { status, .. } => warn!(status, "Upstream returned an error"),
            _ => warn!("{}", self),
        }

        (status, Json(self.envelope())).into_response()
    }
}

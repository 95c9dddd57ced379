// src/server/handlers.rs
// Route handlers: health, credential echo, generate

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use gemchat_types::{ConfigResponse, HealthResponse};
use tracing::{debug, info};

use super::AppState;
use super::input::GenerateInput;
use crate::error::{RelayError, Result};
use crate::upstream::build_payload;

pub const HEALTH_MESSAGE: &str = "Gemini relay is running";

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: HEALTH_MESSAGE.to_string(),
    })
}

/// Echoes the configured credential. Only routed when `expose_credential` is set.
pub async fn config(State(state): State<AppState>) -> Json<ConfigResponse> {
    Json(ConfigResponse {
        api_key: state.config.api_key.clone().unwrap_or_default(),
    })
}

/// Validate, shape and forward one generate request
pub async fn generate(State(state): State<AppState>, input: GenerateInput) -> Result<Response> {
    debug!(
        has_prompt = input.prompt.is_some(),
        has_image = input.image.is_some(),
        "Generate request"
    );
    if input.is_empty() {
        return Err(RelayError::MissingInput);
    }

    let Some(api_key) = state.config.api_key.as_deref() else {
        return Err(RelayError::MissingCredential);
    };

    let payload = build_payload(input.prompt.as_deref(), input.image.as_ref());
    let body = state.backend.generate(api_key, &payload).await?;
    info!(bytes = body.len(), "Generate completed");

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response())
}

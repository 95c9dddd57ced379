// crates/gemchat-client/src/reply.rs
// Pull the reply text out of the upstream payload

use gemchat_types::GenerateContentResponse;
use serde::Deserialize;
use serde_json::Value;

use crate::ClientError;

/// `candidates[0].content.parts[0].text`, or `InvalidResponse`
pub fn extract_reply_text(payload: &Value) -> Result<String, ClientError> {
    let response = GenerateContentResponse::deserialize(payload).map_err(|e| {
        log::warn!("Unexpected reply shape: {}", e);
        ClientError::InvalidResponse
    })?;

    response
        .first_text()
        .map(str::to_string)
        .ok_or(ClientError::InvalidResponse)
}

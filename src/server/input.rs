// src/server/input.rs
// Generate input: JSON `{prompt}` or multipart `{prompt?, image?}`

use axum::{
    Json,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
};
use gemchat_types::{GenerateRequest, IMAGE_FIELD, PROMPT_FIELD};
use tracing::{debug, warn};

use crate::error::RelayError;
use crate::upstream::ImageUpload;

/// Normalized generate input, whichever encoding it arrived in
#[derive(Debug, Default)]
pub struct GenerateInput {
    /// Present only when non-empty; whitespace is forwarded as-is
    pub prompt: Option<String>,
    pub image: Option<ImageUpload>,
}

impl GenerateInput {
    pub fn new(prompt: Option<String>, image: Option<ImageUpload>) -> Self {
        Self {
            prompt: prompt.filter(|p| !p.is_empty()),
            image,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.prompt.is_none() && self.image.is_none()
    }

    async fn from_multipart(mut multipart: Multipart) -> Result<Self, RelayError> {
        let mut prompt = None;
        let mut image = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| RelayError::malformed(e.status(), e.body_text()))?
        {
            let name = field.name().map(str::to_owned);
            match name.as_deref() {
                Some(PROMPT_FIELD) => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| RelayError::malformed(e.status(), e.body_text()))?;
                    prompt = Some(text);
                }
                Some(IMAGE_FIELD) => {
                    if image.is_some() {
                        warn!("Ignoring extra image field");
                        continue;
                    }
                    let content_type = field.content_type().map(str::to_owned);
                    let file_name = field.file_name().map(str::to_owned);
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| RelayError::malformed(e.status(), e.body_text()))?;

                    // Browsers send an empty part for an unset file input
                    if bytes.is_empty() {
                        continue;
                    }
                    debug!(bytes = bytes.len(), ?content_type, "Image received");
                    image = Some(ImageUpload::new(
                        bytes,
                        content_type.as_deref(),
                        file_name.as_deref(),
                    ));
                }
                other => debug!(field = ?other, "Ignoring unknown multipart field"),
            }
        }

        Ok(Self::new(prompt, image))
    }
}

fn is_multipart(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.trim_start().starts_with("multipart/form-data"))
}

impl<S> FromRequest<S> for GenerateInput
where
    S: Send + Sync,
{
    type Rejection = RelayError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_multipart(&req) {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| RelayError::malformed(e.status(), e.body_text()))?;
            return Self::from_multipart(multipart).await;
        }

        let Json(body) = Json::<GenerateRequest>::from_request(req, state)
            .await
            .map_err(|e| RelayError::malformed(e.status(), e.body_text()))?;
        Ok(Self::new(body.prompt, None))
    }
}

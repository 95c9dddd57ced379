// crates/gemchat-app/src/api.rs
// HTTP calls to the gemchat relay

use gemchat_client::{ClientError, OutgoingRequest};
use gemchat_types::{GENERATE_PATH, GenerateRequest, IMAGE_FIELD, PROMPT_FIELD};
use gloo_net::http::Request;
use serde_json::Value;
use wasm_bindgen::JsValue;
use web_sys::FormData;

use crate::attachment::ImageAttachment;

const DEFAULT_RELAY_URL: &str = "http://localhost:3000";

/// Relay base URL, fixed at build time via `GEMCHAT_RELAY_URL`
fn get_api_url(path: &str) -> String {
    let base = option_env!("GEMCHAT_RELAY_URL").unwrap_or(DEFAULT_RELAY_URL);
    format!("{}{}", base.trim_end_matches('/'), path)
}

fn network(e: gloo_net::Error) -> ClientError {
    ClientError::Network(e.to_string())
}

fn js_error(e: JsValue) -> ClientError {
    ClientError::Network(format!("{:?}", e))
}

fn multipart_body(prompt: &str, image: &ImageAttachment) -> Result<FormData, ClientError> {
    let form = FormData::new().map_err(js_error)?;
    form.append_with_str(PROMPT_FIELD, prompt).map_err(js_error)?;
    form.append_with_blob_and_filename(IMAGE_FIELD, image.file(), &image.file().name())
        .map_err(js_error)?;
    Ok(form)
}

/// POST one submission to the relay and return the upstream payload.
pub async fn send_generate(request: &OutgoingRequest<ImageAttachment>) -> Result<Value, ClientError> {
    let url = get_api_url(GENERATE_PATH);
    let builder = Request::post(&url);

    // The browser sets the multipart boundary header for FormData bodies
    let request = match request {
        OutgoingRequest::Json { prompt } => builder
            .json(&GenerateRequest::new(prompt.as_str()))
            .map_err(network)?,
        OutgoingRequest::Multipart { prompt, image } => {
            builder.body(multipart_body(prompt, image)?).map_err(network)?
        }
    };

    let resp = request.send().await.map_err(network)?;
    let status = resp.status();
    let body = resp.text().await.map_err(network)?;

    if !resp.ok() {
        return Err(ClientError::from_status(status, &body));
    }

    serde_json::from_str(&body).map_err(|_| ClientError::InvalidResponse)
}

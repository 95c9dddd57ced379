// src/server/origin.rs
// Origin allow-list enforcement

use axum::{
    extract::{Request, State},
    http::{Method, StatusCode, header::ORIGIN},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use super::AppState;
use crate::error::RelayError;

/// Reject cross-origin callers that are not on the allow-list.
///
/// Requests without an `Origin` header pass. Every `OPTIONS` request gets an
/// empty 200; the CORS layer outside this one decorates it for allowed
/// origins and answers real preflights before they get here.
pub async fn enforce_origin(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }

    if let Some(origin) = request.headers().get(ORIGIN) {
        let allowed = origin
            .to_str()
            .map(|o| state.config.is_origin_allowed(o))
            .unwrap_or(false);
        if !allowed {
            warn!(origin = ?origin, path = %request.uri().path(), "Rejected request from disallowed origin");
            return RelayError::OriginNotAllowed.into_response();
        }
    }

    next.run(request).await
}

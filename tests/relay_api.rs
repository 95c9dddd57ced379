// tests/relay_api.rs
// Router-level tests against a recording stub backend


use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use gemchat::config::RelayConfig;
use gemchat_types::DEFAULT_IMAGE_PROMPT;
use serde_json::json;
use test_utils::*;

// ============================================================================
// Health & config
// ============================================================================

#[tokio::test]
async fn test_health() {
    let app = app_with(test_config(), StubBackend::ok(json!({})));
    let response = send(app, Request::get("/").body(Body::empty()).unwrap()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Gemini relay is running");
}

#[tokio::test]
async fn test_config_route_hidden_by_default() {
    let app = app_with(test_config(), StubBackend::ok(json!({})));
    let response = send(app, Request::get("/api/config").body(Body::empty()).unwrap()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_config_route_when_enabled() {
    let config = RelayConfig {
        expose_credential: true,
        ..test_config()
    };
    let app = app_with(config, StubBackend::ok(json!({})));
    let response = send(app, Request::get("/api/config").body(Body::empty()).unwrap()).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"API_KEY": TEST_KEY}));
}

// ============================================================================
// Input validation
// ============================================================================

#[tokio::test]
async fn test_json_without_prompt_rejected() {
    let backend = StubBackend::ok(reply_payload("unused"));
    let app = app_with(test_config(), backend.clone());

    let response = send(app, json_request(json!({}))).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({"error": "Prompt or image is required"})
    );
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_whitespace_prompt_forwarded_verbatim() {
    let backend = StubBackend::ok(reply_payload("ok"));
    let app = app_with(test_config(), backend.clone());

    let response = send(app, json_request(json!({"prompt": "   "}))).await;

    assert_eq!(response.status(), StatusCode::OK);
    let calls = backend.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0].1,
        json!({"contents": [{"parts": [{"text": "   "}]}]})
    );
}

#[tokio::test]
async fn test_empty_prompt_rejected() {
    let backend = StubBackend::ok(reply_payload("unused"));
    let app = app_with(test_config(), backend.clone());

    let response = send(app, json_request(json!({"prompt": ""}))).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_multipart_without_prompt_or_image_rejected() {
    let backend = StubBackend::ok(reply_payload("unused"));
    let app = app_with(test_config(), backend.clone());

    let request = multipart_request(vec![text_field("prompt", ""), text_field("note", "hi")]);
    let response = send(app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Prompt or image is required");
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_malformed_json_rejected() {
    let backend = StubBackend::ok(reply_payload("unused"));
    let app = app_with(test_config(), backend.clone());

    let request = Request::post("/api/gemini")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = send(app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Invalid request body");
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_json_without_content_type_is_unsupported_media() {
    let backend = StubBackend::ok(reply_payload("unused"));
    let app = app_with(test_config(), backend.clone());

    let request = Request::post("/api/gemini")
        .body(Body::from(json!({"prompt": "Hello"}).to_string()))
        .unwrap();
    let response = send(app, request).await;

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(body_json(response).await["error"], "Invalid request body");
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_oversized_image_rejected_as_too_large() {
    let backend = StubBackend::ok(reply_payload("unused"));
    let app = app_with(test_config(), backend.clone());

    let image = vec![0u8; 21 * 1024 * 1024];
    let request = multipart_request(vec![file_field("image", "big.png", "image/png", &image)]);
    let response = send(app, request).await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body_json(response).await["error"], "Invalid request body");
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_oversized_json_rejected_as_too_large() {
    let backend = StubBackend::ok(reply_payload("unused"));
    let app = app_with(test_config(), backend.clone());

    let prompt = "a".repeat(21 * 1024 * 1024);
    let response = send(app, json_request(json!({"prompt": prompt}))).await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_missing_credential_never_calls_upstream() {
    let backend = StubBackend::ok(reply_payload("unused"));
    let config = RelayConfig {
        api_key: None,
        ..Default::default()
    };
    let app = app_with(config, backend.clone());

    let response = send(app, json_request(json!({"prompt": "Hello"}))).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Server configuration error");
    assert!(backend.calls().is_empty());
}

// ============================================================================
// Payload shaping
// ============================================================================

#[tokio::test]
async fn test_text_prompt_forwarded_and_reply_passed_through() {
    let upstream = reply_payload("Hi there");
    let backend = StubBackend::ok(upstream.clone());
    let app = app_with(test_config(), backend.clone());

    let response = send(app, json_request(json!({"prompt": "Hello"}))).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json"
    );
    assert_eq!(body_bytes(response).await, upstream.to_string());

    let calls = backend.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, TEST_KEY);
    assert_eq!(
        calls[0].1,
        json!({"contents": [{"parts": [{"text": "Hello"}]}]})
    );
}

#[tokio::test]
async fn test_multipart_prompt_only_is_text_payload() {
    let backend = StubBackend::ok(reply_payload("ok"));
    let app = app_with(test_config(), backend.clone());

    let response = send(app, multipart_request(vec![text_field("prompt", "Hello")])).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        backend.calls()[0].1,
        json!({"contents": [{"parts": [{"text": "Hello"}]}]})
    );
}

#[tokio::test]
async fn test_image_without_prompt_uses_default() {
    let backend = StubBackend::ok(reply_payload("A cat"));
    let app = app_with(test_config(), backend.clone());

    let request = multipart_request(vec![file_field("image", "cat.png", "image/png", b"\x89PNG")]);
    let response = send(app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let calls = backend.calls();
    let parts = calls[0].1["contents"][0]["parts"].as_array().unwrap().clone();
    assert_eq!(parts.len(), 2);
    assert_eq!(
        parts[0],
        json!({"inline_data": {"mime_type": "image/png", "data": "iVBORw=="}})
    );
    assert_eq!(parts[1], json!({"text": DEFAULT_IMAGE_PROMPT}));
}

#[tokio::test]
async fn test_image_with_prompt() {
    let backend = StubBackend::ok(reply_payload("A cat"));
    let app = app_with(test_config(), backend.clone());

    let request = multipart_request(vec![
        text_field("prompt", "What animal is this?"),
        file_field("image", "cat.webp", "image/webp", b"RIFF"),
    ]);
    let response = send(app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let parts = backend.calls()[0].1["contents"][0]["parts"].clone();
    assert_eq!(parts[0]["inline_data"]["mime_type"], "image/webp");
    assert_eq!(parts[1], json!({"text": "What animal is this?"}));
}

#[tokio::test]
async fn test_undetectable_image_type_defaults_to_jpeg() {
    let backend = StubBackend::ok(reply_payload("ok"));
    let app = app_with(test_config(), backend.clone());

    let request = multipart_request(vec![file_field(
        "image",
        "upload",
        "application/octet-stream",
        b"\xff\xd8\xff",
    )]);
    send(app, request).await;

    let parts = backend.calls()[0].1["contents"][0]["parts"].clone();
    assert_eq!(parts[0]["inline_data"]["mime_type"], "image/jpeg");
}

// ============================================================================
// Upstream errors
// ============================================================================

#[tokio::test]
async fn test_upstream_error_status_and_body_passed_through() {
    let upstream_body = r#"{"error":{"code":429,"message":"Resource exhausted"}}"#;
    let backend = StubBackend::failing(429, upstream_body);
    let app = app_with(test_config(), backend);

    let response = send(app, json_request(json!({"prompt": "Hello"}))).await;

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(
        body_json(response).await,
        json!({
            "error": "Upstream API error",
            "details": {"error": {"code": 429, "message": "Resource exhausted"}}
        })
    );
}

// ============================================================================
// Cross-origin policy
// ============================================================================

#[tokio::test]
async fn test_disallowed_origin_rejected() {
    let backend = StubBackend::ok(reply_payload("unused"));
    let app = app_with(test_config(), backend.clone());

    let mut request = json_request(json!({"prompt": "Hello"}));
    request
        .headers_mut()
        .insert(header::ORIGIN, "http://evil.test".parse().unwrap());
    let response = send(app, request).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none()
    );
    assert_eq!(body_json(response).await["error"], "Origin not allowed");
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_allowed_origin_gets_cors_headers() {
    let app = app_with(test_config(), StubBackend::ok(reply_payload("Hi")));

    let mut request = json_request(json!({"prompt": "Hello"}));
    request
        .headers_mut()
        .insert(header::ORIGIN, ALLOWED_ORIGIN.parse().unwrap());
    let response = send(app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        ALLOWED_ORIGIN
    );
}

#[tokio::test]
async fn test_preflight_succeeds_with_empty_body() {
    let app = app_with(test_config(), StubBackend::ok(json!({})));

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/gemini")
        .header(header::ORIGIN, ALLOWED_ORIGIN)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();
    let response = send(app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        ALLOWED_ORIGIN
    );
    assert!(body_bytes(response).await.is_empty());
}

#[tokio::test]
async fn test_plain_options_from_unknown_origin_still_succeeds() {
    let app = app_with(test_config(), StubBackend::ok(json!({})));

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/gemini")
        .header(header::ORIGIN, "http://evil.test")
        .body(Body::empty())
        .unwrap();
    let response = send(app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_bytes(response).await.is_empty());
}

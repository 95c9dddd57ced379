// src/server/mod.rs
// HTTP surface of the relay
//
// - GET  /            - Health check
// - GET  /api/config  - Credential echo (only with --expose-credential)
// - POST /api/gemini  - Forward a prompt and/or image upstream

pub mod handlers;
pub mod input;
mod origin;

use std::sync::Arc;

use anyhow::Result;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{get, post},
};
use gemchat_types::{CONFIG_PATH, GENERATE_PATH, HEALTH_PATH};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::RelayConfig;
use crate::upstream::{GeminiClient, GenerativeBackend};

// ============================================================================
// Server State
// ============================================================================

/// Shared, read-only per-process state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RelayConfig>,
    pub backend: Arc<dyn GenerativeBackend>,
}

impl AppState {
    pub fn new(config: RelayConfig, backend: Arc<dyn GenerativeBackend>) -> Self {
        Self {
            config: Arc::new(config),
            backend,
        }
    }

    /// State backed by the real upstream client
    pub fn from_config(config: RelayConfig) -> Self {
        let backend = Arc::new(GeminiClient::new(&config.upstream_url, &config.model));
        Self::new(config, backend)
    }
}

// ============================================================================
// Routes
// ============================================================================

fn cors_layer(config: &RelayConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(origin = %origin, error = %e, "Skipping invalid allowed origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

/// Create the router with all endpoints
pub fn create_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route(HEALTH_PATH, get(handlers::health))
        .route(GENERATE_PATH, post(handlers::generate));

    if state.config.expose_credential {
        router = router.route(CONFIG_PATH, get(handlers::config));
    }

    router
        .layer(DefaultBodyLimit::max(state.config.body_limit_bytes))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            origin::enforce_origin,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.config))
        .with_state(state)
}

/// Run the HTTP server until Ctrl+C / SIGTERM
pub async fn run(config: RelayConfig) -> Result<()> {
    config.log_summary();

    let address = config.bind_address();
    let app = create_router(AppState::from_config(config));

    let listener = TcpListener::bind(&address).await?;
    info!("Relay listening on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Relay shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received terminate signal, shutting down"),
    }
}

// src/config/mod.rs
// Relay configuration: CLI flags with environment fallbacks

use std::path::PathBuf;

use clap::Args;
use tracing::{debug, info, warn};

/// Environment variable holding the upstream credential
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_UPSTREAM_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:8080";

/// Upper bound on request bodies (the upstream's inline-data ceiling)
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 20 * 1024 * 1024;

/// Command-line surface for the relay
#[derive(Args, Debug, Clone)]
pub struct RelayArgs {
    /// Address to bind
    #[arg(long, env = "GEMCHAT_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Upstream model name
    #[arg(long, env = "GEMCHAT_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Upstream API base URL
    #[arg(long, env = "GEMCHAT_UPSTREAM_URL", default_value = DEFAULT_UPSTREAM_URL)]
    pub upstream_url: String,

    /// Origin allowed to call the relay (repeatable, or comma separated in env)
    #[arg(
        long = "allowed-origin",
        env = "GEMCHAT_ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = DEFAULT_ALLOWED_ORIGIN
    )]
    pub allowed_origins: Vec<String>,

    /// Mount GET /api/config, which returns the upstream credential. Debug only.
    #[arg(long, env = "GEMCHAT_EXPOSE_CREDENTIAL")]
    pub expose_credential: bool,
}

/// Everything the relay needs at runtime. Immutable once built.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub host: String,
    pub port: u16,
    /// `None` when unset; generate calls then fail with a configuration error
    pub api_key: Option<String>,
    pub model: String,
    pub upstream_url: String,
    pub allowed_origins: Vec<String>,
    pub expose_credential: bool,
    pub body_limit_bytes: usize,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            allowed_origins: vec![DEFAULT_ALLOWED_ORIGIN.to_string()],
            expose_credential: false,
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
        }
    }
}

impl RelayConfig {
    /// Build from parsed flags and the credential read from the environment
    pub fn from_args(args: RelayArgs, api_key: Option<String>) -> Self {
        let allowed_origins: Vec<String> = args
            .allowed_origins
            .into_iter()
            .map(|o| o.trim().trim_end_matches('/').to_string())
            .filter(|o| !o.is_empty())
            .collect();

        Self {
            host: args.host,
            port: args.port,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model: args.model,
            upstream_url: args.upstream_url,
            allowed_origins,
            expose_credential: args.expose_credential,
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn is_origin_allowed(&self, origin: &str) -> bool {
        self.allowed_origins.iter().any(|o| o == origin)
    }

    /// Log the effective configuration (never the credential itself)
    pub fn log_summary(&self) {
        info!(model = %self.model, upstream = %self.upstream_url, "Upstream configured");
        info!(origins = ?self.allowed_origins, "CORS allow-list");

        if self.api_key.is_some() {
            debug!("{} loaded", API_KEY_VAR);
        } else {
            warn!("{} not set - generate requests will fail", API_KEY_VAR);
        }

        if self.expose_credential {
            warn!("Credential echo enabled: GET /api/config returns {}", API_KEY_VAR);
        }
    }
}

/// The `.env` load error worth reporting. A missing file is not one.
pub fn dotenv_failure(result: &dotenvy::Result<PathBuf>) -> Option<&dotenvy::Error> {
    match result {
        Err(e) if !e.not_found() => Some(e),
        _ => None,
    }
}

/// Read a single key from the environment, filtering empty values
pub fn read_key(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|k| !k.trim().is_empty())
}

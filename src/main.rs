// src/main.rs
// gemchat relay entry point

use anyhow::Result;
use clap::Parser;
use gemchat::config::{self, API_KEY_VAR, RelayArgs, RelayConfig};
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "gemchat")]
#[command(about = "Relay between the gemchat browser client and the Gemini API")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    relay: RelayArgs,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, env = "GEMCHAT_LOG_LEVEL", default_value = "info")]
    log_level: Level,
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; real environment variables win
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if let Ok(path) = &dotenv {
        info!("Loaded environment from {}", path.display());
    }
    if let Some(e) = config::dotenv_failure(&dotenv) {
        warn!("Ignoring .env: {}", e);
    }

    let config = RelayConfig::from_args(cli.relay, config::read_key(API_KEY_VAR));
    gemchat::server::run(config).await
}

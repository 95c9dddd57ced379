// src/lib.rs
// gemchat relay: forwards browser chat requests to the Gemini API

pub mod config;
pub mod error;
pub mod server;
pub mod upstream;

pub use config::{RelayArgs, RelayConfig};
pub use error::RelayError;
pub use server::{AppState, create_router};

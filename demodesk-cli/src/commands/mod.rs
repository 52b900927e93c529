//! Command implementations for demodesk CLI

pub mod check;
pub mod requests;
pub mod serve;

// Re-export main dispatcher functions for flat access from main.rs
pub use check::run_check;
pub use requests::run_requests;
pub use serve::run_serve;

use anyhow::{Context, Result};
use demodesk_server::ServerConfig;

/// Server configuration from the environment (after `.env` has been loaded).
fn load_config() -> Result<ServerConfig> {
    ServerConfig::from_env().context("Invalid configuration in environment")
}

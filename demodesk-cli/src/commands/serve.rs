//! HTTP server command
//!
//! Runs the demodesk API. The store is resolved once here; a missing or
//! unreachable database leaves the server up in degraded mode.

use std::net::IpAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use demodesk_server::{run_server, store, MemoryStore, StoreHandle};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (overrides HOST, default 0.0.0.0)
    #[arg(long)]
    pub host: Option<IpAddr>,

    /// Port to listen on (overrides PORT, default 8000)
    #[arg(long, short = 'p')]
    pub port: Option<u16>,

    /// Database URL (overrides DATABASE_URL)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Logical database name (overrides DATABASE_NAME)
    #[arg(long)]
    pub database_name: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Keep demo requests in process memory instead of a database
    #[arg(long, conflicts_with = "database_url")]
    pub memory: bool,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let mut config = super::load_config()?;

    if let Some(host) = args.host {
        config.bind_addr.set_ip(host);
    }
    if let Some(port) = args.port {
        config.bind_addr.set_port(port);
    }
    if let Some(url) = args.database_url {
        config.database.url = Some(url);
    }
    if let Some(name) = args.database_name {
        config.database.name = name;
    }
    config.request_timeout = Duration::from_secs(args.timeout);

    tracing::info!("Starting demodesk server on {}", config.bind_addr);

    let handle = if args.memory {
        tracing::warn!("Using in-memory store - demo requests are lost on exit");
        StoreHandle::connected(MemoryStore::new(config.database.name.clone()))
    } else {
        store::connect(&config.database).await
    };

    // Run server (blocks until shutdown)
    run_server(config, handle).await.context("Server error")?;

    Ok(())
}

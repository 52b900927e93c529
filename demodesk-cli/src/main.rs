//! demodesk CLI - demo request intake backend
//!
//! This is the main entry point for the demodesk command-line tool, which provides:
//! - The HTTP API server (`serve` subcommand)
//! - Stored demo request listing (`requests` subcommand)
//! - A local health/diagnostics report (`check` subcommand)

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "demodesk",
    author,
    version,
    about = "Demo request intake backend with degraded-mode health reporting",
    long_about = "Collect demo request leads over HTTP into a PostgreSQL-backed document store. \
                  Health, metrics and diagnostics keep answering when the database is unavailable."
)]
struct Cli {
    /// Enable debug logging (unless RUST_LOG is set)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// List stored demo requests (newest first)
    Requests(commands::requests::RequestsArgs),
    /// Report health, metrics and store diagnostics without starting the server
    Check(commands::check::CheckArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; real environment variables still apply
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Requests(args) => commands::run_requests(args).await?,
        Commands::Check(args) => commands::run_check(args).await?,
    }

    Ok(())
}

//! Local health check - runs the health, metrics and diagnostics handlers
//! against the configured store without starting the server.

use anyhow::Result;
use clap::Parser;
use serde::Serialize;

use demodesk_server::handlers;
use demodesk_server::models::{DiagnosticsReport, HealthStatus, MetricValue, MetricsOut};
use demodesk_server::{store, EnvSource};

#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Print the combined report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct CheckReport {
    health: HealthStatus,
    metrics: MetricsOut,
    diagnostics: DiagnosticsReport,
}

pub async fn run_check(args: CheckArgs) -> Result<()> {
    let config = super::load_config()?;
    let handle = store::connect(&config.database).await;

    let report = CheckReport {
        health: handlers::health(&handle),
        metrics: handlers::metrics(&handle).await,
        diagnostics: handlers::diagnostics(&handle, &EnvSource::Process).await,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let diag = &report.diagnostics;
    println!("Backend:      {}", diag.backend);
    println!("Database:     {}", diag.database);
    println!("Connection:   {}", diag.connection_status);
    println!("DATABASE_URL  {}", diag.database_url);
    println!("DATABASE_NAME {}", diag.database_name);
    if let Some(name) = &diag.active_database {
        println!("Active:       {}", name);
    }
    if !diag.collections.is_empty() {
        println!("Collections:  {}", diag.collections.join(", "));
    }

    println!();
    println!("Metrics:");
    for metric in &report.metrics.metrics {
        let value = match &metric.value {
            MetricValue::Numeric(n) => n.to_string(),
            MetricValue::Formatted(s) => s.clone(),
        };
        println!("  {:<14} {:>8}  ({})", metric.label, value, metric.hint);
    }

    Ok(())
}

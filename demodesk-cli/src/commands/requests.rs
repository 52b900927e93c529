//! List stored demo requests

use anyhow::{bail, Context, Result};
use clap::Parser;

use demodesk_server::handlers::list_demo_requests;
use demodesk_server::store::{self, StoredDocument};

#[derive(Parser, Debug)]
pub struct RequestsArgs {
    /// Only show requests from this exact email address
    #[arg(long)]
    pub email: Option<String>,

    /// Maximum number of requests to show (newest first)
    #[arg(long, short = 'n', default_value_t = 20)]
    pub limit: u32,

    /// Print one JSON document per line
    #[arg(long)]
    pub json: bool,
}

pub async fn run_requests(args: RequestsArgs) -> Result<()> {
    let config = super::load_config()?;

    let handle = store::connect(&config.database).await;
    if let store::StoreHandle::Disconnected(reason) = &handle {
        bail!("Cannot list demo requests: {}", reason);
    }

    let docs = list_demo_requests(&handle, args.email.as_deref(), Some(args.limit))
        .await
        .context("Failed to read demo requests")?;

    if args.json {
        for doc in &docs {
            println!("{}", serde_json::to_string(doc)?);
        }
        return Ok(());
    }

    if docs.is_empty() {
        println!("No demo requests found");
        return Ok(());
    }

    for doc in &docs {
        println!("{}", format_row(doc));
    }

    Ok(())
}

fn field<'a>(doc: &'a StoredDocument, key: &str) -> &'a str {
    doc.data.get(key).and_then(|v| v.as_str()).unwrap_or("-")
}

fn format_row(doc: &StoredDocument) -> String {
    format!(
        "{}  {:<32}  {:<20}  {}",
        doc.created_at.format("%Y-%m-%d %H:%M"),
        field(doc, "email"),
        field(doc, "name"),
        field(doc, "company"),
    )
}

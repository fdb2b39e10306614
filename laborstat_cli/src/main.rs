mod commands;
mod output;

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use laborstat_lib::{DiskCache, LaborMarketClient};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "laborstat")]
#[command(about = "Query US labor-market statistics from the BLS API")]
struct Cli {
    /// Output format: table or json
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// Directory for the on-disk response cache
    #[arg(long, env = "LABORSTAT_CACHE_DIR", default_value = ".laborstat-cache")]
    cache_dir: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the wage distribution for an occupation
    Wages(commands::wages::WagesArgs),
    /// Show the current labor-market snapshot
    Snapshot(commands::snapshot::SnapshotArgs),
    /// Compare an occupation's median wage across regions
    Compare(commands::compare::CompareArgs),
    /// Score an occupation's career outlook
    Outlook(commands::outlook::OutlookArgs),
    /// Clear the local cache so the next query refetches
    Refresh,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("laborstat=info".parse().unwrap()),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        _ => OutputFormat::Table,
    };

    let cache = Arc::new(DiskCache::new(&cli.cache_dir));
    let mut client = LaborMarketClient::new(cache)?;
    if let Ok(key) = std::env::var("BLS_API_KEY") {
        if !key.is_empty() {
            client = client.with_registration_key(key);
        }
    }

    match &cli.command {
        Commands::Wages(args) => commands::wages::run(args, &client, &format).await?,
        Commands::Snapshot(args) => commands::snapshot::run(args, &client, &format).await?,
        Commands::Compare(args) => commands::compare::run(args, &client, &format).await?,
        Commands::Outlook(args) => commands::outlook::run(args, &client, &format).await?,
        Commands::Refresh => {
            let removed = client.refresh();
            println!("Removed {} cached entries", removed);
        }
    }

    Ok(())
}

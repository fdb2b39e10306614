//! The `snapshot` subcommand: point-in-time national labor-market summary.

use anyhow::{anyhow, Result};
use clap::Args;
use laborstat_lib::LaborMarketClient;

use crate::commands::{describe_error, print_warnings};
use crate::output::{print_json, print_snapshot_table, OutputFormat};

/// Arguments for the `snapshot` subcommand.
#[derive(Args)]
pub struct SnapshotArgs {}

pub async fn run(
    _args: &SnapshotArgs,
    client: &LaborMarketClient,
    format: &OutputFormat,
) -> Result<()> {
    let assembled = client
        .market_snapshot()
        .await
        .map_err(|e| anyhow!(describe_error(&e)))?;

    print_warnings(&assembled.warnings);
    match format {
        OutputFormat::Json => print_json(&assembled.data)?,
        OutputFormat::Table => print_snapshot_table(&assembled.data),
    }
    Ok(())
}

//! The `compare` subcommand: median wage deltas across regions.

use anyhow::{anyhow, bail, Result};
use clap::Args;
use laborstat_lib::LaborMarketClient;

use crate::commands::{describe_error, print_warnings};
use crate::output::{print_comparison_table, print_json, OutputFormat};

/// Arguments for the `compare` subcommand.
#[derive(Args)]
pub struct CompareArgs {
    /// SOC occupation code, e.g. 15-1252 or 151252
    pub occupation: String,

    /// Base region the deltas are measured from, e.g. CA
    #[arg(long)]
    pub base: String,

    /// Comparison regions (repeatable), e.g. --with TX --with NY
    #[arg(long = "with", required = true)]
    pub with: Vec<String>,
}

pub async fn run(
    args: &CompareArgs,
    client: &LaborMarketClient,
    format: &OutputFormat,
) -> Result<()> {
    if args.with.is_empty() {
        bail!("at least one comparison region is required");
    }

    let assembled = client
        .compare_regional_wages(&args.occupation, &args.base, &args.with)
        .await
        .map_err(|e| anyhow!(describe_error(&e)))?;

    print_warnings(&assembled.warnings);
    match format {
        OutputFormat::Json => print_json(&assembled.data)?,
        OutputFormat::Table => print_comparison_table(&assembled.data),
    }
    Ok(())
}

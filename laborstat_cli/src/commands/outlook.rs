//! The `outlook` subcommand: deterministic career-outlook scorecard.

use anyhow::{anyhow, Result};
use clap::Args;
use laborstat_lib::LaborMarketClient;

use crate::commands::{describe_error, print_warnings};
use crate::output::{print_json, print_outlook, OutputFormat};

/// Arguments for the `outlook` subcommand.
#[derive(Args)]
pub struct OutlookArgs {
    /// SOC occupation code, e.g. 15-1252 or 151252
    pub occupation: String,
}

pub async fn run(
    args: &OutlookArgs,
    client: &LaborMarketClient,
    format: &OutputFormat,
) -> Result<()> {
    let assembled = client
        .career_outlook(&args.occupation)
        .await
        .map_err(|e| anyhow!(describe_error(&e)))?;

    print_warnings(&assembled.warnings);
    match format {
        OutputFormat::Json => print_json(&assembled.data)?,
        OutputFormat::Table => print_outlook(&assembled.data),
    }
    Ok(())
}

//! The `wages` subcommand: percentile wage distribution for an occupation.

use anyhow::{anyhow, Result};
use clap::Args;
use laborstat_lib::LaborMarketClient;

use crate::commands::{describe_error, print_warnings};
use crate::output::{print_json, print_wages_table, OutputFormat};

/// Arguments for the `wages` subcommand.
#[derive(Args)]
pub struct WagesArgs {
    /// SOC occupation code, e.g. 15-1252 or 151252
    pub occupation: String,

    /// Geography: state abbreviation (CA), area code, or omit for national
    #[arg(long)]
    pub geography: Option<String>,
}

pub async fn run(args: &WagesArgs, client: &LaborMarketClient, format: &OutputFormat) -> Result<()> {
    let assembled = client
        .occupation_wages(&args.occupation, args.geography.as_deref())
        .await
        .map_err(|e| anyhow!(describe_error(&e)))?;

    print_warnings(&assembled.warnings);
    match format {
        OutputFormat::Json => print_json(&assembled.data)?,
        OutputFormat::Table => print_wages_table(&assembled.data),
    }
    Ok(())
}

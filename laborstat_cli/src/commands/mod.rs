//! Subcommand implementations for the `laborstat` binary.

pub mod compare;
pub mod outlook;
pub mod snapshot;
pub mod wages;

use laborstat_lib::{FetchError, FetchWarning};

/// Renders a fetch error for the terminal, with a usage hint where the
/// remedy is on the user's side rather than ours.
pub fn describe_error(err: &FetchError) -> String {
    match err {
        FetchError::RateLimited => {
            "rate limited by the BLS API; try again in a few minutes \
             (an API key via BLS_API_KEY raises the daily quota)"
                .to_string()
        }
        FetchError::NoDataAvailable => {
            "no data available for that query; check the occupation code and geography".to_string()
        }
        other => other.to_string(),
    }
}

/// Prints assembler warnings to stderr so piped JSON output stays clean.
pub fn print_warnings(warnings: &[FetchWarning]) {
    for warning in warnings {
        eprintln!("warning: {}", warning);
    }
}

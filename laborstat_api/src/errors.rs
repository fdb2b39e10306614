//! Error taxonomy for the fetch layer.
//!
//! These eight variants are the only failure kinds the rest of the system
//! branches on. They are values, never panics: once past the fetcher
//! boundary every failure travels as a `FetchError`.

/// Errors that can occur when building or issuing a series request.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// A series identifier was missing, malformed, or the batch was
    /// empty/over the per-request limit.
    #[error("invalid series identifier: {0}")]
    InvalidSeriesId(String),
    /// The requested year range has a start year after its end year.
    #[error("invalid date range: start year {start} is after end year {end}")]
    InvalidDateRange { start: i32, end: i32 },
    /// The API returned HTTP 429. Callers should back off before retrying.
    #[error("rate limited by the BLS API")]
    RateLimited,
    /// The API returned a non-success status, or a processed request was
    /// rejected at the envelope level.
    #[error("API request failed with status {status}: {message}")]
    Api { status: u16, message: String },
    /// The request could not reach the API (DNS, connect, timeout).
    #[error("network error: {0}")]
    Network(String),
    /// Every requested series came back without a single data point.
    #[error("no data available for the requested series")]
    NoDataAvailable,
    /// The response body could not be read or deserialized.
    #[error("failed to parse API response: {0}")]
    Parse(String),
    /// Anything that does not fit the variants above.
    #[error("unexpected error: {0}")]
    Unknown(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() || e.is_request() {
            FetchError::Network(e.to_string())
        } else if e.is_decode() {
            FetchError::Parse(e.to_string())
        } else {
            FetchError::Unknown(e.to_string())
        }
    }
}

//! HTTP client for the BLS public timeseries API.

use std::time::Duration;

use url::Url;

use crate::errors::FetchError;
use crate::series::SeriesId;
use crate::types::{FetchWarning, RawEnvelope, SeriesEnvelope, SeriesRecord, SeriesRequest, YearRange};

/// The provider caps one request at this many series.
pub const MAX_SERIES_PER_REQUEST: usize = 50;

/// Request timeout; the fetcher enforces nothing beyond the transport's own.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const TIMESERIES_PATH: &str = "/publicAPI/v2/timeseries/data/";

/// Result of a successful batch fetch.
///
/// Series that returned zero data points are not errors: they are dropped
/// from `series` and reported in `warnings`, as long as at least one
/// requested series carried data.
#[derive(Debug)]
pub struct FetchOutcome {
    pub series: Vec<SeriesRecord>,
    pub warnings: Vec<FetchWarning>,
}

/// Client for the timeseries endpoint.
///
/// Does exactly one thing: posts a batch of identifiers and normalizes the
/// response. No caching, no retries — both are the caller's concern, which
/// keeps this independently testable against a fake transport.
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    registration_key: Option<String>,
}

impl Client {
    /// Creates a client pointing at the production BLS API.
    pub fn new() -> Result<Client, FetchError> {
        Client::with_base_url("https://api.bls.gov")
    }

    /// Creates a client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Result<Client, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| FetchError::Unknown(format!("failed to build HTTP client: {}", e)))?;
        Ok(Client {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            registration_key: None,
        })
    }

    /// Attaches a registration key, which raises the provider's daily quota.
    pub fn with_registration_key(mut self, key: impl Into<String>) -> Client {
        self.registration_key = Some(key.into());
        self
    }

    /// Posts one batch of series identifiers for the given year range.
    ///
    /// Fails fast (no network call) on an empty batch, an over-limit batch,
    /// or an inverted year range.
    pub async fn fetch_series(
        &self,
        ids: &[SeriesId],
        years: YearRange,
    ) -> Result<FetchOutcome, FetchError> {
        if ids.is_empty() {
            return Err(FetchError::InvalidSeriesId(
                "series batch is empty".to_string(),
            ));
        }
        if ids.len() > MAX_SERIES_PER_REQUEST {
            return Err(FetchError::InvalidSeriesId(format!(
                "batch of {} series exceeds the per-request limit of {}",
                ids.len(),
                MAX_SERIES_PER_REQUEST
            )));
        }
        if years.start > years.end {
            return Err(FetchError::InvalidDateRange {
                start: years.start,
                end: years.end,
            });
        }

        let url = self.timeseries_url()?;
        let request = SeriesRequest {
            seriesid: ids.iter().map(|id| id.as_str().to_string()).collect(),
            startyear: years.start.to_string(),
            endyear: years.end.to_string(),
            catalog: false,
            calculations: false,
            annualaverage: true,
            registrationkey: self.registration_key.clone(),
        };

        let resp = self
            .http
            .post(url)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("timeseries request failed: {}", e);
                FetchError::from(e)
            })?;

        let status = resp.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            tracing::warn!("rate limited by the timeseries endpoint");
            return Err(FetchError::RateLimited);
        }

        let body = resp.text().await.map_err(|e| {
            tracing::error!("failed to read response body: {}", e);
            FetchError::Parse(e.to_string())
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("timeseries request failed with status {}: {}", status, snippet);
            return Err(FetchError::Api {
                status: status.as_u16(),
                message: snippet,
            });
        }

        let raw: RawEnvelope = serde_json::from_str(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("failed to parse envelope: {} | body: {}", e, snippet);
            FetchError::Parse(e.to_string())
        })?;
        let envelope = SeriesEnvelope::from(raw);

        if !envelope.succeeded() {
            let message = if envelope.messages.is_empty() {
                envelope.status.clone()
            } else {
                envelope.messages.join("; ")
            };
            tracing::error!("request not processed: {}", message);
            return Err(FetchError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let outcome = split_empty_series(envelope.series);
        if outcome.series.is_empty() {
            tracing::warn!("no requested series returned any data");
            return Err(FetchError::NoDataAvailable);
        }
        Ok(outcome)
    }

    fn timeseries_url(&self) -> Result<Url, FetchError> {
        Url::parse(&format!("{}{}", self.base_url, TIMESERIES_PATH)).map_err(|e| {
            tracing::error!("invalid URL constructed: {}", e);
            FetchError::Unknown(e.to_string())
        })
    }
}

/// Separates series without a single data point into warnings. When every
/// requested series is empty the whole call is a `NoDataAvailable` failure.
fn split_empty_series(series: Vec<SeriesRecord>) -> FetchOutcome {
    let mut kept = Vec::with_capacity(series.len());
    let mut warnings = Vec::new();
    for record in series {
        if record.points.is_empty() {
            warnings.push(FetchWarning::empty_series(&record.series_id));
        } else {
            kept.push(record);
        }
    }
    FetchOutcome {
        series: kept,
        warnings,
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        return body.to_string();
    }
    // The cut must land on a char boundary or the slice panics.
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...[truncated]", &body[..end])
}

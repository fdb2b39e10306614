//! Low-level client for the BLS public timeseries API: series identifier
//! codec, geography normalization, and the batch fetcher with its typed
//! error taxonomy.

mod client;
mod errors;
pub mod geography;
pub mod series;
pub mod types;

pub use self::client::{Client, FetchOutcome, MAX_SERIES_PER_REQUEST};
pub use self::errors::FetchError;
pub use self::geography::{normalize_area, Area, AreaResolver, UnknownState, UsAreaResolver};
pub use self::series::{decode, ParsedSeries, Seasonal, SeriesId, UnparseableSeries};
pub use self::types::{DataPoint, FetchWarning, SeriesRecord, YearRange};

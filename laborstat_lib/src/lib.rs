//! Service layer for the labor-market data client: versioned TTL caching,
//! the composite assemblers, and the pure derived-analytics functions.
//!
//! Wraps the `laborstat_api` crate's fetcher with an injected cache store
//! and turns raw time-series batches into domain records (wage
//! distributions, market snapshots, regional comparisons, career
//! outlooks), degrading gracefully when only some sub-fetches fail.

pub mod analytics;
pub mod cache;
pub mod client;
pub mod types;

pub use laborstat_api;
pub use laborstat_api::{Area, AreaResolver, FetchError, FetchWarning, UsAreaResolver};

pub use analytics::{
    market_temperature, outlook_score, percentile_rank, MarketTemperature, OutlookRating,
};
pub use cache::{CacheStore, DiskCache, MemoryCache};
pub use client::LaborMarketClient;
pub use types::{
    Assembled, CareerOutlook, MarketSnapshot, PercentileLadder, RegionWage, RegionalComparison,
    RegionalDelta, WageDistribution,
};

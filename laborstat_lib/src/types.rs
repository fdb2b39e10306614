//! Domain records assembled from raw series data.
//!
//! All of these are immutable once built: a cache refresh produces a new
//! value that replaces the old cache slot, nothing is mutated in place.

use laborstat_api::{Area, FetchWarning};
use serde::{Deserialize, Serialize};

use crate::analytics::{MarketTemperature, OutlookRating};

/// A successful assembler result plus any non-fatal warnings gathered
/// along the way (empty series, failed sub-fetches that were degraded).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assembled<T> {
    pub data: T,
    pub warnings: Vec<FetchWarning>,
}

impl<T> Assembled<T> {
    pub fn clean(data: T) -> Assembled<T> {
        Assembled {
            data,
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(data: T, warnings: Vec<FetchWarning>) -> Assembled<T> {
        Assembled { data, warnings }
    }
}

/// One percentile ladder of a wage distribution. Every field is
/// independently nullable: the source suppresses measures with small
/// samples, and consumers must not assume completeness.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PercentileLadder {
    pub p10: Option<f64>,
    pub p25: Option<f64>,
    pub median: Option<f64>,
    pub p75: Option<f64>,
    pub p90: Option<f64>,
    pub mean: Option<f64>,
}

/// Occupational wage distribution for one geography and reference period,
/// with parallel annual and hourly ladders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WageDistribution {
    /// Normalized 6-character occupation code.
    pub occupation: String,
    pub area: Area,
    /// Reference year of the most recent observation seen.
    pub year: Option<i32>,
    pub annual: PercentileLadder,
    pub hourly: PercentileLadder,
}

/// Point-in-time aggregate of the national labor market. Fields default to
/// zero when their sub-fetch failed; the accompanying warnings say which.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// Unemployment rate, percent.
    pub unemployment_rate: f64,
    /// Month-over-month change of the unemployment rate.
    pub unemployment_rate_delta: f64,
    /// Total employment, thousands.
    pub total_employment: f64,
    /// Month-over-month change of total employment, thousands.
    pub employment_delta: f64,
    /// Labor-force participation rate, percent.
    pub participation_rate: f64,
    /// Job openings, thousands.
    pub job_openings: f64,
    /// Quits rate, percent.
    pub quits_rate: f64,
    /// Year-over-year CPI change, percent.
    pub inflation_yoy: f64,
    pub temperature: MarketTemperature,
}

/// Median annual wage observed for one region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionWage {
    pub area: Area,
    pub median_annual: f64,
}

/// A comparison region annotated with its distance from the base region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionalDelta {
    pub area: Area,
    pub median_annual: f64,
    /// Absolute difference from the base region's median.
    pub difference: f64,
    /// Difference as a percentage of the base region's median.
    pub percent_difference: f64,
}

/// Base region versus a set of comparison regions, with a separate
/// national reference point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionalComparison {
    pub occupation: String,
    pub base: RegionWage,
    pub comparisons: Vec<RegionalDelta>,
    /// National median annual wage, when available.
    pub national_median: Option<f64>,
}

/// Deterministic scorecard for an occupation's prospects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerOutlook {
    pub occupation: String,
    /// Additive score in [0, 100].
    pub score: u8,
    pub rating: OutlookRating,
    pub median_annual_wage: Option<f64>,
    /// Employment count for the occupation, when available.
    pub employment: Option<f64>,
}

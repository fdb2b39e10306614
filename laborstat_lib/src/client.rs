//! The composite assemblers: domain queries in, typed records out.
//!
//! Every assembler follows the same shape: build identifiers, check the
//! cache, on a miss fetch, parse raw points into domain fields, cache the
//! result, return it. The cached value is the whole [`Assembled`] payload,
//! warnings included, so a degraded result replays with its warnings
//! instead of masquerading as clean data for the rest of its TTL.
//! Concurrent sub-fetches are always fully settled before any branching on
//! failure, so one failed source never cancels its siblings.

use chrono::{Datelike, Utc};
use futures::future::join_all;
use std::sync::Arc;

use laborstat_api::series::{
    cpi_all_items, employment_level, job_openings_level, participation_rate, quits_rate,
    unemployment_rate, normalize_occupation, ParsedSeries, WageMeasure, WageSeries,
};
use laborstat_api::{
    decode, normalize_area, Area, AreaResolver, Client, FetchError, FetchWarning, SeriesId,
    SeriesRecord, UsAreaResolver, YearRange,
};

use crate::analytics::{
    latest_delta, market_temperature, outlook_score, year_over_year_percent, OutlookRating,
};
use crate::cache::{cache_key, get_cached, put_cached, CacheStore, CACHE_PREFIX, SNAPSHOT_TTL, WAGE_TTL};
use crate::types::{
    Assembled, CareerOutlook, MarketSnapshot, PercentileLadder, RegionWage, RegionalComparison,
    RegionalDelta, WageDistribution,
};

/// How many years back each wage request reaches. OEWS publishes annually,
/// so two years guarantees at least one observation.
const WAGE_YEARS_BACK: i32 = 2;

/// Snapshot sources are monthly; two years covers the YoY CPI reference.
const SNAPSHOT_YEARS_BACK: i32 = 2;

/// High-level labor-market client: a fetcher plus an injected cache store
/// and area resolver.
///
/// The cache is an optimization only; every method produces the same data
/// with a cold cache. Concurrent calls for the same key may both fetch and
/// both write — last write wins, which is fine because payloads for one
/// key are idempotent given the same upstream data.
pub struct LaborMarketClient {
    fetcher: Client,
    cache: Arc<dyn CacheStore>,
    resolver: Arc<dyn AreaResolver>,
}

impl LaborMarketClient {
    /// Creates a client against the production API with the built-in US
    /// area resolver.
    pub fn new(cache: Arc<dyn CacheStore>) -> Result<LaborMarketClient, FetchError> {
        Ok(LaborMarketClient {
            fetcher: Client::new()?,
            cache,
            resolver: Arc::new(UsAreaResolver),
        })
    }

    /// Creates a client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(
        base_url: &str,
        cache: Arc<dyn CacheStore>,
    ) -> Result<LaborMarketClient, FetchError> {
        Ok(LaborMarketClient {
            fetcher: Client::with_base_url(base_url)?,
            cache,
            resolver: Arc::new(UsAreaResolver),
        })
    }

    /// Attaches a registration key for the higher request quota.
    pub fn with_registration_key(mut self, key: impl Into<String>) -> LaborMarketClient {
        self.fetcher = self.fetcher.with_registration_key(key);
        self
    }

    /// Swaps in a different area resolver.
    pub fn with_resolver(mut self, resolver: Arc<dyn AreaResolver>) -> LaborMarketClient {
        self.resolver = resolver;
        self
    }

    /// Fetches the full wage distribution for an occupation, nationally or
    /// within the given geography.
    ///
    /// Issues the 12 ladder series as one batch; a series the source
    /// suppressed becomes a `None` field, never an error.
    pub async fn occupation_wages(
        &self,
        occupation: &str,
        geography: Option<&str>,
    ) -> Result<Assembled<WageDistribution>, FetchError> {
        let occ = normalize_occupation(occupation);
        let area = normalize_area(geography, self.resolver.as_ref());
        let key = cache_key(&["wages", &occ, &area.code()]);
        if let Some(cached) = get_cached::<Assembled<WageDistribution>>(self.cache.as_ref(), &key)
        {
            tracing::debug!("cache hit for {}", key);
            return Ok(cached);
        }

        let ids: Vec<SeriesId> = WageMeasure::LADDER
            .iter()
            .map(|m| WageSeries::new(&occ, *m, area.clone(), None).encode())
            .collect();
        let outcome = self
            .fetcher
            .fetch_series(&ids, self.wage_years())
            .await?;

        let distribution = reduce_wage_series(occ, area, &outcome.series);
        let assembled = Assembled::with_warnings(distribution, outcome.warnings);
        put_cached(self.cache.as_ref(), &key, &assembled, WAGE_TTL);
        Ok(assembled)
    }

    /// Assembles the point-in-time market snapshot from three independent
    /// sources: CPS labor-force series, JOLTS turnover series, and CPI.
    ///
    /// All three fetches run concurrently and all settle before any
    /// branching. A failed source is degraded to a warning with its fields
    /// left at zero; the call only fails when every source came back empty.
    pub async fn market_snapshot(&self) -> Result<Assembled<MarketSnapshot>, FetchError> {
        let key = cache_key(&["snapshot"]);
        if let Some(cached) = get_cached::<Assembled<MarketSnapshot>>(self.cache.as_ref(), &key) {
            tracing::debug!("cache hit for {}", key);
            return Ok(cached);
        }

        let years = YearRange::trailing(current_year(), SNAPSHOT_YEARS_BACK);
        let cps_ids = [unemployment_rate(), employment_level(), participation_rate()];
        let jolts_ids = [job_openings_level(), quits_rate()];
        let cpi_ids = [cpi_all_items()];
        let (cps, jolts, cpi) = tokio::join!(
            self.fetcher.fetch_series(&cps_ids, years),
            self.fetcher.fetch_series(&jolts_ids, years),
            self.fetcher.fetch_series(&cpi_ids, years),
        );

        let mut snapshot = MarketSnapshot::default();
        let mut warnings = Vec::new();
        let mut usable = false;

        match cps {
            Ok(outcome) => {
                usable = true;
                warnings.extend(outcome.warnings);
                if let Some(record) = find_series(&outcome.series, &cps_ids[0]) {
                    snapshot.unemployment_rate = latest_value(record);
                    snapshot.unemployment_rate_delta = latest_delta(record).unwrap_or(0.0);
                }
                if let Some(record) = find_series(&outcome.series, &cps_ids[1]) {
                    snapshot.total_employment = latest_value(record);
                    snapshot.employment_delta = latest_delta(record).unwrap_or(0.0);
                }
                if let Some(record) = find_series(&outcome.series, &cps_ids[2]) {
                    snapshot.participation_rate = latest_value(record);
                }
            }
            Err(e) => {
                tracing::warn!("labor-force sub-fetch failed: {}", e);
                warnings.push(FetchWarning::new(format!(
                    "labor-force data unavailable: {}",
                    e
                )));
            }
        }

        match jolts {
            Ok(outcome) => {
                usable = true;
                warnings.extend(outcome.warnings);
                if let Some(record) = find_series(&outcome.series, &jolts_ids[0]) {
                    snapshot.job_openings = latest_value(record);
                }
                if let Some(record) = find_series(&outcome.series, &jolts_ids[1]) {
                    snapshot.quits_rate = latest_value(record);
                }
            }
            Err(e) => {
                tracing::warn!("job-openings sub-fetch failed: {}", e);
                warnings.push(FetchWarning::new(format!(
                    "job-openings data unavailable: {}",
                    e
                )));
            }
        }

        match cpi {
            Ok(outcome) => {
                usable = true;
                warnings.extend(outcome.warnings);
                if let Some(record) = find_series(&outcome.series, &cpi_ids[0]) {
                    snapshot.inflation_yoy = year_over_year_percent(record).unwrap_or(0.0);
                }
            }
            Err(e) => {
                tracing::warn!("price-index sub-fetch failed: {}", e);
                warnings.push(FetchWarning::new(format!(
                    "price-index data unavailable: {}",
                    e
                )));
            }
        }

        if !usable {
            return Err(FetchError::NoDataAvailable);
        }

        snapshot.temperature =
            market_temperature(snapshot.unemployment_rate, snapshot.job_openings);
        let assembled = Assembled::with_warnings(snapshot, warnings);
        put_cached(self.cache.as_ref(), &key, &assembled, SNAPSHOT_TTL);
        Ok(assembled)
    }

    /// Compares an occupation's median annual wage across regions.
    ///
    /// The base region, every comparison region, and the national
    /// reference are fetched concurrently. A failed comparison region is
    /// dropped with a warning naming its area code; a failed base fails
    /// the call, since the deltas are measured from it.
    pub async fn compare_regional_wages(
        &self,
        occupation: &str,
        base: &str,
        comparisons: &[String],
    ) -> Result<Assembled<RegionalComparison>, FetchError> {
        let occ = normalize_occupation(occupation);
        let base_area = normalize_area(Some(base), self.resolver.as_ref());
        // Distinct inputs can normalize to the same area; fetch each once.
        let mut comparison_areas: Vec<Area> = Vec::new();
        for geography in comparisons {
            let area = normalize_area(Some(geography), self.resolver.as_ref());
            if area != base_area && !comparison_areas.contains(&area) {
                comparison_areas.push(area);
            }
        }

        let comparison_codes: Vec<String> =
            comparison_areas.iter().map(|a| a.code()).collect();
        let key = cache_key(&[
            "regional",
            &occ,
            &base_area.code(),
            &comparison_codes.join("+"),
        ]);
        if let Some(cached) =
            get_cached::<Assembled<RegionalComparison>>(self.cache.as_ref(), &key)
        {
            tracing::debug!("cache hit for {}", key);
            return Ok(cached);
        }

        let mut areas = vec![base_area.clone()];
        areas.extend(comparison_areas);
        if !areas.contains(&Area::National) {
            areas.push(Area::National);
        }
        let results = join_all(areas.iter().map(|area| {
            let occ = occ.clone();
            async move { (area.clone(), self.fetch_median_annual(&occ, area.clone()).await) }
        }))
        .await;

        let mut warnings = Vec::new();
        let mut base_median = None;
        let mut national_median = None;
        let mut regions = Vec::new();
        for (area, result) in results {
            match result {
                Ok(median) if area == base_area => base_median = Some(median),
                Ok(median) if area == Area::National => national_median = Some(median),
                Ok(median) => regions.push((area, median)),
                Err(e) if area == base_area => return Err(e),
                Err(e) => {
                    tracing::warn!("regional wage fetch failed for {}: {}", area.code(), e);
                    warnings.push(FetchWarning::new(format!(
                        "wage data unavailable for area {}: {}",
                        area.code(),
                        e
                    )));
                }
            }
        }
        let base_median = base_median.ok_or(FetchError::NoDataAvailable)?;

        let comparisons = regions
            .into_iter()
            .map(|(area, median)| RegionalDelta {
                difference: median - base_median,
                percent_difference: if base_median != 0.0 {
                    (median - base_median) / base_median * 100.0
                } else {
                    0.0
                },
                area,
                median_annual: median,
            })
            .collect();

        let comparison = RegionalComparison {
            occupation: occ,
            base: RegionWage {
                area: base_area,
                median_annual: base_median,
            },
            comparisons,
            national_median,
        };
        let assembled = Assembled::with_warnings(comparison, warnings);
        put_cached(self.cache.as_ref(), &key, &assembled, WAGE_TTL);
        Ok(assembled)
    }

    /// Builds the deterministic outlook scorecard for an occupation from
    /// its national wage distribution and employment count.
    pub async fn career_outlook(
        &self,
        occupation: &str,
    ) -> Result<Assembled<CareerOutlook>, FetchError> {
        let occ = normalize_occupation(occupation);
        let key = cache_key(&["outlook", &occ]);
        if let Some(cached) = get_cached::<Assembled<CareerOutlook>>(self.cache.as_ref(), &key) {
            tracing::debug!("cache hit for {}", key);
            return Ok(cached);
        }

        let (wages, employment) = tokio::join!(
            self.occupation_wages(occupation, None),
            self.fetch_employment(&occ),
        );

        let wages = wages?;
        let mut warnings = wages.warnings;
        let employment = match employment {
            Ok(count) => Some(count),
            Err(e) => {
                tracing::warn!("employment fetch failed for {}: {}", occ, e);
                warnings.push(FetchWarning::new(format!(
                    "employment count unavailable: {}",
                    e
                )));
                None
            }
        };

        let median = wages.data.annual.median;
        let score = outlook_score(median, employment);
        let outlook = CareerOutlook {
            occupation: occ,
            score,
            rating: OutlookRating::from_score(score),
            median_annual_wage: median,
            employment,
        };
        let assembled = Assembled::with_warnings(outlook, warnings);
        put_cached(self.cache.as_ref(), &key, &assembled, WAGE_TTL);
        Ok(assembled)
    }

    /// Clears every cached entry, returning the count removed. The
    /// explicit retry path: there is no automatic retry anywhere else.
    pub fn refresh(&self) -> usize {
        self.cache.clear_all(CACHE_PREFIX)
    }

    async fn fetch_median_annual(&self, occupation: &str, area: Area) -> Result<f64, FetchError> {
        let id = WageSeries::new(occupation, WageMeasure::AnnualMedian, area, None).encode();
        let outcome = self.fetcher.fetch_series(&[id], self.wage_years()).await?;
        outcome
            .series
            .first()
            .and_then(|r| r.latest())
            .map(|p| p.value)
            .ok_or(FetchError::NoDataAvailable)
    }

    async fn fetch_employment(&self, occupation: &str) -> Result<f64, FetchError> {
        let id =
            WageSeries::new(occupation, WageMeasure::Employment, Area::National, None).encode();
        let outcome = self.fetcher.fetch_series(&[id], self.wage_years()).await?;
        outcome
            .series
            .first()
            .and_then(|r| r.latest())
            .map(|p| p.value)
            .ok_or(FetchError::NoDataAvailable)
    }

    fn wage_years(&self) -> YearRange {
        YearRange::trailing(current_year(), WAGE_YEARS_BACK)
    }
}

fn current_year() -> i32 {
    Utc::now().year()
}

fn find_series<'a>(series: &'a [SeriesRecord], id: &SeriesId) -> Option<&'a SeriesRecord> {
    series.iter().find(|r| r.series_id == id.as_str())
}

fn latest_value(record: &SeriesRecord) -> f64 {
    record.latest().map(|p| p.value).unwrap_or(0.0)
}

/// Reduces the 12-series wage batch into the two percentile ladders,
/// taking each series' most recent observation.
fn reduce_wage_series(
    occupation: String,
    area: Area,
    series: &[SeriesRecord],
) -> WageDistribution {
    let mut distribution = WageDistribution {
        occupation,
        area,
        year: None,
        annual: PercentileLadder::default(),
        hourly: PercentileLadder::default(),
    };

    for record in series {
        let measure = match decode(&record.series_id) {
            Ok(ParsedSeries::Wage(wage)) => wage.measure,
            _ => {
                tracing::debug!("skipping unexpected series {}", record.series_id);
                continue;
            }
        };
        let point = match record.latest() {
            Some(point) => point,
            None => continue,
        };
        distribution.year = Some(distribution.year.map_or(point.year, |y| y.max(point.year)));
        let value = Some(point.value);
        match measure {
            WageMeasure::HourlyMean => distribution.hourly.mean = value,
            WageMeasure::AnnualMean => distribution.annual.mean = value,
            WageMeasure::HourlyP10 => distribution.hourly.p10 = value,
            WageMeasure::HourlyP25 => distribution.hourly.p25 = value,
            WageMeasure::HourlyMedian => distribution.hourly.median = value,
            WageMeasure::HourlyP75 => distribution.hourly.p75 = value,
            WageMeasure::HourlyP90 => distribution.hourly.p90 = value,
            WageMeasure::AnnualP10 => distribution.annual.p10 = value,
            WageMeasure::AnnualP25 => distribution.annual.p25 = value,
            WageMeasure::AnnualMedian => distribution.annual.median = value,
            WageMeasure::AnnualP75 => distribution.annual.p75 = value,
            WageMeasure::AnnualP90 => distribution.annual.p90 = value,
            WageMeasure::Employment => {}
        }
    }
    distribution
}

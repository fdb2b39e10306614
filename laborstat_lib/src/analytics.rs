//! Pure derived-analytics functions: percentile rank interpolation, market
//! temperature, and the career-outlook score.
//!
//! Everything here is I/O-free and deterministic so it can be unit-tested
//! directly; the assemblers only wire results through.

use laborstat_api::SeriesRecord;
use serde::{Deserialize, Serialize};

use crate::types::PercentileLadder;

/// Width of the implied decile above p90, as a fraction of p90.
///
/// A heuristic inherited from the original gauge, not a statistically
/// derived rule; tune with care if rank values above the 90th percentile
/// ever matter precisely.
pub const EXTRAPOLATION_DECILE_WIDTH: f64 = 0.2;

/// Unemployment rate below which the market can be called hot.
const HOT_MAX_UNEMPLOYMENT: f64 = 4.5;
/// Job openings (thousands) above which the market can be called hot.
const HOT_MIN_OPENINGS: f64 = 7000.0;
/// Unemployment rate above which the market is cool.
const COOL_MIN_UNEMPLOYMENT: f64 = 6.0;
/// Job openings (thousands) below which the market is cool.
const COOL_MAX_OPENINGS: f64 = 4000.0;

/// Where a value sits within a wage distribution, as a percentile in
/// [1, 99].
///
/// Linear interpolation inside each ladder bracket; below p10 the rank
/// falls off linearly toward zero (floored at 1); above p90 it
/// extrapolates into an implied next decile of width
/// `p90 * EXTRAPOLATION_DECILE_WIDTH` (capped at 99). Returns `None` when
/// any of the five percentile points is missing — a partial ladder has no
/// meaningful brackets.
pub fn percentile_rank(value: f64, ladder: &PercentileLadder) -> Option<f64> {
    let p10 = ladder.p10?;
    let p25 = ladder.p25?;
    let median = ladder.median?;
    let p75 = ladder.p75?;
    let p90 = ladder.p90?;

    let rank = if value <= p10 {
        interpolate(value, 0.0, p10, 0.0, 10.0)
    } else if value <= p25 {
        interpolate(value, p10, p25, 10.0, 25.0)
    } else if value <= median {
        interpolate(value, p25, median, 25.0, 50.0)
    } else if value <= p75 {
        interpolate(value, median, p75, 50.0, 75.0)
    } else if value <= p90 {
        interpolate(value, p75, p90, 75.0, 90.0)
    } else {
        interpolate(value, p90, p90 + p90 * EXTRAPOLATION_DECILE_WIDTH, 90.0, 100.0)
    };
    Some(rank.clamp(1.0, 99.0))
}

fn interpolate(value: f64, lo: f64, hi: f64, lo_rank: f64, hi_rank: f64) -> f64 {
    let span = hi - lo;
    if span <= 0.0 {
        return hi_rank;
    }
    lo_rank + (hi_rank - lo_rank) * (value - lo) / span
}

/// Coarse classification of labor-market tightness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketTemperature {
    Hot,
    #[default]
    Warm,
    Cool,
}

impl std::fmt::Display for MarketTemperature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            MarketTemperature::Hot => "hot",
            MarketTemperature::Warm => "warm",
            MarketTemperature::Cool => "cool",
        })
    }
}

/// Classifies the market from the unemployment rate (percent) and job
/// openings (thousands).
pub fn market_temperature(unemployment_rate: f64, job_openings: f64) -> MarketTemperature {
    if unemployment_rate < HOT_MAX_UNEMPLOYMENT && job_openings > HOT_MIN_OPENINGS {
        MarketTemperature::Hot
    } else if unemployment_rate > COOL_MIN_UNEMPLOYMENT || job_openings < COOL_MAX_OPENINGS {
        MarketTemperature::Cool
    } else {
        MarketTemperature::Warm
    }
}

/// Outlook band derived from the 0-100 outlook score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutlookRating {
    Excellent,
    Good,
    Fair,
    Limited,
    Declining,
}

impl OutlookRating {
    pub fn from_score(score: u8) -> OutlookRating {
        match score {
            75..=u8::MAX => OutlookRating::Excellent,
            60..=74 => OutlookRating::Good,
            40..=59 => OutlookRating::Fair,
            25..=39 => OutlookRating::Limited,
            _ => OutlookRating::Declining,
        }
    }
}

impl std::fmt::Display for OutlookRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            OutlookRating::Excellent => "excellent",
            OutlookRating::Good => "good",
            OutlookRating::Fair => "fair",
            OutlookRating::Limited => "limited",
            OutlookRating::Declining => "declining",
        })
    }
}

/// Additive outlook score: a 50-point base plus wage and employment
/// bonuses, clamped to [0, 100]. Within each input only the highest
/// threshold met applies.
pub fn outlook_score(median_annual_wage: Option<f64>, employment: Option<f64>) -> u8 {
    let mut score: i32 = 50;
    if let Some(wage) = median_annual_wage {
        if wage > 100_000.0 {
            score += 15;
        } else if wage > 70_000.0 {
            score += 10;
        } else if wage > 50_000.0 {
            score += 5;
        }
    }
    if let Some(employment) = employment {
        if employment > 500_000.0 {
            score += 10;
        } else if employment > 100_000.0 {
            score += 5;
        }
    }
    score.clamp(0, 100) as u8
}

/// Difference between the two most recent observations of a series, most
/// recent minus previous. `None` when fewer than two points exist.
pub fn latest_delta(record: &SeriesRecord) -> Option<f64> {
    match record.points.as_slice() {
        [latest, previous, ..] => Some(latest.value - previous.value),
        _ => None,
    }
}

/// Percent change of the latest observation against the same period one
/// year earlier. `None` when that reference point is absent or zero.
pub fn year_over_year_percent(record: &SeriesRecord) -> Option<f64> {
    let latest = record.points.first()?;
    let reference = record
        .points
        .iter()
        .find(|p| p.year == latest.year - 1 && p.period == latest.period)?;
    if reference.value == 0.0 {
        return None;
    }
    Some((latest.value - reference.value) / reference.value * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use laborstat_api::DataPoint;

    fn full_ladder() -> PercentileLadder {
        PercentileLadder {
            p10: Some(60_000.0),
            p25: Some(85_000.0),
            median: Some(130_000.0),
            p75: Some(165_000.0),
            p90: Some(200_000.0),
            mean: Some(135_000.0),
        }
    }

    #[test]
    fn rank_at_each_ladder_point_is_exact() {
        let ladder = full_ladder();
        assert_eq!(percentile_rank(60_000.0, &ladder), Some(10.0));
        assert_eq!(percentile_rank(85_000.0, &ladder), Some(25.0));
        assert_eq!(percentile_rank(130_000.0, &ladder), Some(50.0));
        assert_eq!(percentile_rank(165_000.0, &ladder), Some(75.0));
        assert_eq!(percentile_rank(200_000.0, &ladder), Some(90.0));
    }

    #[test]
    fn rank_interpolates_within_brackets() {
        let ladder = full_ladder();
        // Midpoint of the 25-50 bracket.
        assert_eq!(percentile_rank(107_500.0, &ladder), Some(37.5));
    }

    #[test]
    fn rank_is_monotone_in_the_value() {
        let ladder = full_ladder();
        let mut last = 0.0;
        for value in (0..300).map(|i| i as f64 * 1_000.0) {
            let rank = percentile_rank(value, &ladder).unwrap();
            assert!(rank >= last, "rank decreased at value {}", value);
            last = rank;
        }
    }

    #[test]
    fn rank_clamps_to_1_and_99() {
        let ladder = full_ladder();
        assert_eq!(percentile_rank(0.0, &ladder), Some(1.0));
        assert_eq!(percentile_rank(10_000_000.0, &ladder), Some(99.0));
    }

    #[test]
    fn rank_extrapolates_above_p90() {
        let ladder = full_ladder();
        // Halfway into the implied next decile: p90 * 0.2 = 40k wide.
        assert_eq!(percentile_rank(220_000.0, &ladder), Some(95.0));
    }

    #[test]
    fn incomplete_ladder_has_no_rank() {
        let mut ladder = full_ladder();
        ladder.p75 = None;
        assert_eq!(percentile_rank(100_000.0, &ladder), None);
    }

    #[test]
    fn temperature_thresholds() {
        assert_eq!(market_temperature(4.0, 7500.0), MarketTemperature::Hot);
        assert_eq!(market_temperature(5.0, 5000.0), MarketTemperature::Warm);
        assert_eq!(market_temperature(6.5, 5000.0), MarketTemperature::Cool);
        assert_eq!(market_temperature(4.0, 3000.0), MarketTemperature::Cool);
        // Boundary values are not hot and not cool.
        assert_eq!(market_temperature(4.5, 7500.0), MarketTemperature::Warm);
        assert_eq!(market_temperature(6.0, 4000.0), MarketTemperature::Warm);
    }

    #[test]
    fn outlook_score_is_additive_with_exclusive_brackets() {
        assert_eq!(outlook_score(None, None), 50);
        assert_eq!(outlook_score(Some(130_000.0), None), 65);
        assert_eq!(outlook_score(Some(80_000.0), None), 60);
        assert_eq!(outlook_score(Some(55_000.0), None), 55);
        assert_eq!(outlook_score(Some(40_000.0), None), 50);
        assert_eq!(outlook_score(Some(130_000.0), Some(600_000.0)), 75);
        assert_eq!(outlook_score(Some(130_000.0), Some(150_000.0)), 70);
        assert_eq!(outlook_score(None, Some(600_000.0)), 60);
    }

    #[test]
    fn outlook_ratings_map_from_scores() {
        assert_eq!(OutlookRating::from_score(75), OutlookRating::Excellent);
        assert_eq!(OutlookRating::from_score(60), OutlookRating::Good);
        assert_eq!(OutlookRating::from_score(59), OutlookRating::Fair);
        assert_eq!(OutlookRating::from_score(40), OutlookRating::Fair);
        assert_eq!(OutlookRating::from_score(25), OutlookRating::Limited);
        assert_eq!(OutlookRating::from_score(24), OutlookRating::Declining);
    }

    fn record(points: Vec<(i32, &str, f64)>) -> SeriesRecord {
        SeriesRecord {
            series_id: "LNS14000000".to_string(),
            points: points
                .into_iter()
                .map(|(year, period, value)| DataPoint {
                    year,
                    period: period.to_string(),
                    value,
                })
                .collect(),
        }
    }

    #[test]
    fn delta_subtracts_the_two_most_recent_points() {
        let r = record(vec![(2025, "M06", 4.1), (2025, "M05", 4.3)]);
        assert!((latest_delta(&r).unwrap() + 0.2).abs() < 1e-9);
        assert_eq!(latest_delta(&record(vec![(2025, "M06", 4.1)])), None);
    }

    #[test]
    fn yoy_percent_needs_the_same_period_last_year() {
        let r = record(vec![
            (2025, "M06", 322.56),
            (2025, "M05", 321.47),
            (2024, "M06", 313.05),
        ]);
        let yoy = year_over_year_percent(&r).unwrap();
        assert!((yoy - 3.0378).abs() < 0.001);

        let no_ref = record(vec![(2025, "M06", 322.56), (2025, "M05", 321.47)]);
        assert_eq!(year_over_year_percent(&no_ref), None);
    }
}

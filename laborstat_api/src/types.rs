//! Wire types for the timeseries endpoint.
//!
//! The same endpoint can answer in two envelope shapes: the provider's own
//! (`Results`, `message`) and the proxy's lower-cased rendition (`results`,
//! `messages`). Both deserialize into [`RawEnvelope`] via serde aliases and
//! are normalized into one canonical [`SeriesEnvelope`] before any other
//! logic touches the response.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Envelope status indicating the request was processed.
pub const STATUS_SUCCEEDED: &str = "REQUEST_SUCCEEDED";

/// A non-fatal problem attached to an otherwise successful result, e.g. a
/// requested series that came back without data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchWarning(String);

impl FetchWarning {
    pub fn new(message: impl Into<String>) -> FetchWarning {
        FetchWarning(message.into())
    }

    pub(crate) fn empty_series(series_id: &str) -> FetchWarning {
        FetchWarning(format!("series {} returned no data points", series_id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FetchWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Inclusive year range for a series request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> YearRange {
        YearRange { start, end }
    }

    /// The most common request shape: the last `back` years up to and
    /// including `latest`.
    pub fn trailing(latest: i32, back: i32) -> YearRange {
        YearRange {
            start: latest - back,
            end: latest,
        }
    }
}

/// POST body for the timeseries endpoint.
#[derive(Debug, Serialize)]
pub struct SeriesRequest {
    pub seriesid: Vec<String>,
    pub startyear: String,
    pub endyear: String,
    pub catalog: bool,
    pub calculations: bool,
    pub annualaverage: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registrationkey: Option<String>,
}

/// Response envelope as it appears on the wire, accepting both the proxy
/// and the direct provider field names.
#[derive(Debug, Deserialize)]
pub struct RawEnvelope {
    #[serde(default)]
    pub status: String,
    #[serde(default, alias = "messages")]
    pub message: Vec<String>,
    #[serde(default, alias = "Results")]
    pub results: Option<RawResults>,
}

#[derive(Debug, Deserialize)]
pub struct RawResults {
    #[serde(default)]
    pub series: Vec<RawSeries>,
}

#[derive(Debug, Deserialize)]
pub struct RawSeries {
    #[serde(rename = "seriesID", alias = "seriesId")]
    pub series_id: String,
    #[serde(default)]
    pub data: Vec<RawPoint>,
}

/// A single observation as sent by the API. Everything arrives as strings;
/// suppressed observations carry a non-numeric `value` such as `"-"`.
#[derive(Debug, Deserialize)]
pub struct RawPoint {
    pub year: String,
    pub period: String,
    pub value: String,
}

/// One observation of a series, after normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub year: i32,
    /// Period string as published, e.g. `M03` or `A01`. Within one series
    /// the strings sort lexicographically in chronological order.
    pub period: String,
    pub value: f64,
}

/// One requested series with its observations sorted most-recent first
/// (year descending, then period string descending).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesRecord {
    pub series_id: String,
    pub points: Vec<DataPoint>,
}

impl SeriesRecord {
    /// The most recent observation, if any.
    pub fn latest(&self) -> Option<&DataPoint> {
        self.points.first()
    }
}

/// The canonical, normalized response envelope.
#[derive(Debug)]
pub struct SeriesEnvelope {
    pub status: String,
    pub messages: Vec<String>,
    pub series: Vec<SeriesRecord>,
}

impl SeriesEnvelope {
    pub fn succeeded(&self) -> bool {
        self.status == STATUS_SUCCEEDED
    }
}

impl From<RawEnvelope> for SeriesEnvelope {
    fn from(raw: RawEnvelope) -> SeriesEnvelope {
        let series = raw
            .results
            .map(|r| r.series)
            .unwrap_or_default()
            .into_iter()
            .map(normalize_series)
            .collect();
        SeriesEnvelope {
            status: raw.status,
            messages: raw.message,
            series,
        }
    }
}

fn normalize_series(raw: RawSeries) -> SeriesRecord {
    let mut points: Vec<DataPoint> = raw
        .data
        .into_iter()
        .filter_map(|p| {
            let year = p.year.trim().parse::<i32>().ok()?;
            // Suppressed observations ("-") drop out here and surface as
            // missing fields downstream.
            let value = p.value.trim().parse::<f64>().ok()?;
            Some(DataPoint {
                year,
                period: p.period,
                value,
            })
        })
        .collect();
    points.sort_by(|a, b| b.year.cmp(&a.year).then_with(|| b.period.cmp(&a.period)));
    SeriesRecord {
        series_id: raw.series_id,
        points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_envelope_shape_deserializes() {
        let json = r#"{
            "status": "REQUEST_SUCCEEDED",
            "responseTime": 120,
            "message": [],
            "Results": {
                "series": [{
                    "seriesID": "LNS14000000",
                    "data": [
                        {"year": "2025", "period": "M05", "periodName": "May", "value": "4.2", "footnotes": [{}]},
                        {"year": "2025", "period": "M06", "periodName": "June", "value": "4.1", "footnotes": [{}]}
                    ]
                }]
            }
        }"#;
        let raw: RawEnvelope = serde_json::from_str(json).unwrap();
        let envelope = SeriesEnvelope::from(raw);
        assert!(envelope.succeeded());
        assert_eq!(envelope.series.len(), 1);
        let record = &envelope.series[0];
        assert_eq!(record.series_id, "LNS14000000");
        // Most recent first.
        assert_eq!(record.latest().unwrap().period, "M06");
        assert_eq!(record.latest().unwrap().value, 4.1);
    }

    #[test]
    fn proxy_envelope_shape_deserializes() {
        let json = r#"{
            "status": "REQUEST_SUCCEEDED",
            "messages": ["served from proxy"],
            "results": {
                "series": [{
                    "seriesId": "CUUR0000SA0",
                    "data": [{"year": "2025", "period": "M06", "value": "322.56"}]
                }]
            }
        }"#;
        let raw: RawEnvelope = serde_json::from_str(json).unwrap();
        let envelope = SeriesEnvelope::from(raw);
        assert!(envelope.succeeded());
        assert_eq!(envelope.messages, vec!["served from proxy"]);
        assert_eq!(envelope.series[0].series_id, "CUUR0000SA0");
    }

    #[test]
    fn suppressed_values_are_dropped() {
        let raw = RawSeries {
            series_id: "OEUN000000000000015125211".to_string(),
            data: vec![
                RawPoint {
                    year: "2024".to_string(),
                    period: "A01".to_string(),
                    value: "-".to_string(),
                },
                RawPoint {
                    year: "2023".to_string(),
                    period: "A01".to_string(),
                    value: "101290".to_string(),
                },
            ],
        };
        let record = normalize_series(raw);
        assert_eq!(record.points.len(), 1);
        assert_eq!(record.latest().unwrap().year, 2023);
    }

    #[test]
    fn points_sort_by_year_then_period() {
        let raw = RawSeries {
            series_id: "LNS14000000".to_string(),
            data: vec![
                RawPoint {
                    year: "2024".to_string(),
                    period: "M12".to_string(),
                    value: "4.1".to_string(),
                },
                RawPoint {
                    year: "2025".to_string(),
                    period: "M01".to_string(),
                    value: "4.0".to_string(),
                },
                RawPoint {
                    year: "2025".to_string(),
                    period: "M02".to_string(),
                    value: "4.1".to_string(),
                },
            ],
        };
        let record = normalize_series(raw);
        let periods: Vec<(i32, &str)> = record
            .points
            .iter()
            .map(|p| (p.year, p.period.as_str()))
            .collect();
        assert_eq!(periods, vec![(2025, "M02"), (2025, "M01"), (2024, "M12")]);
    }
}

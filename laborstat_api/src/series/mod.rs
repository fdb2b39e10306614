//! Series identifier codec.
//!
//! BLS addresses every time series with a fixed-width identifier string.
//! Four survey domains are supported, each with its own layout, selected by
//! the 2-character survey prefix at the start of the identifier:
//!
//! | Prefix | Survey                  | Variant                |
//! |--------|-------------------------|------------------------|
//! | `OE`   | OEWS wages/employment   | [`WageSeries`]         |
//! | `JT`   | JOLTS openings/quits    | [`OpeningsSeries`]     |
//! | `LN`   | CPS labor force         | [`UnemploymentSeries`] |
//! | `CU`   | CPI urban price index   | [`PriceIndexSeries`]   |
//!
//! The wire format is kept byte-for-byte compatible with what the API
//! expects; the offset math lives here and nowhere else. For every
//! well-formed identifier, `decode` followed by `encode` reproduces the
//! original string.

mod cpi;
mod cps;
mod jolts;
mod wage;

use std::fmt;

pub use cpi::{cpi_all_items, Periodicity, PriceIndexSeries};
pub use cps::{
    employment_level, participation_rate, unemployment_rate, UnemploymentSeries,
    EMPLOYMENT_LEVEL_MEASURE, PARTICIPATION_RATE_MEASURE, UNEMPLOYMENT_RATE_MEASURE,
};
pub use jolts::{job_openings_level, quits_rate, DataElement, OpeningsSeries, RateOrLevel};
pub use wage::{normalize_occupation, WageMeasure, WageSeries, CROSS_INDUSTRY};

/// An opaque, fixed-format identifier addressing one BLS time series.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SeriesId(String);

impl SeriesId {
    pub(crate) fn new(raw: String) -> Self {
        SeriesId(raw)
    }

    /// The raw identifier string as sent on the wire.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SeriesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<SeriesId> for String {
    fn from(id: SeriesId) -> String {
        id.0
    }
}

/// Seasonal-adjustment flag, the third character of every identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Seasonal {
    /// Seasonally adjusted (`S`).
    Adjusted,
    /// Not seasonally adjusted (`U`).
    Unadjusted,
}

impl Seasonal {
    pub(crate) fn letter(self) -> char {
        match self {
            Seasonal::Adjusted => 'S',
            Seasonal::Unadjusted => 'U',
        }
    }

    pub(crate) fn from_letter(c: u8) -> Option<Seasonal> {
        match c {
            b'S' => Some(Seasonal::Adjusted),
            b'U' => Some(Seasonal::Unadjusted),
            _ => None,
        }
    }
}

/// A decoded identifier, tagged by survey domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedSeries {
    /// OEWS occupational wage or employment series.
    Wage(WageSeries),
    /// JOLTS openings/quits/hires series.
    Openings(OpeningsSeries),
    /// CPS labor-force series (unemployment, employment level, participation).
    Unemployment(UnemploymentSeries),
    /// CPI price-index series.
    PriceIndex(PriceIndexSeries),
}

impl ParsedSeries {
    /// Re-encodes the parsed components into the wire identifier.
    pub fn encode(&self) -> SeriesId {
        match self {
            ParsedSeries::Wage(s) => s.encode(),
            ParsedSeries::Openings(s) => s.encode(),
            ParsedSeries::Unemployment(s) => s.encode(),
            ParsedSeries::PriceIndex(s) => s.encode(),
        }
    }
}

/// An identifier that does not match any known survey layout.
///
/// Malformed identifiers are a data problem, not a programming error, so
/// decoding returns this as a value rather than panicking.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unparseable series identifier: {0}")]
pub struct UnparseableSeries(pub String);

/// Decodes a raw identifier string into its survey-tagged components.
pub fn decode(id: &str) -> Result<ParsedSeries, UnparseableSeries> {
    let parsed = match id.get(..2) {
        Some("OE") => WageSeries::decode(id).map(ParsedSeries::Wage),
        Some("JT") => OpeningsSeries::decode(id).map(ParsedSeries::Openings),
        Some("LN") => UnemploymentSeries::decode(id).map(ParsedSeries::Unemployment),
        Some("CU") => PriceIndexSeries::decode(id).map(ParsedSeries::PriceIndex),
        _ => None,
    };
    parsed.ok_or_else(|| UnparseableSeries(id.to_string()))
}

pub(crate) fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

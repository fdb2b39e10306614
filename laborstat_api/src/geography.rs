//! Geography scopes and the area-code resolver interface.
//!
//! BLS series embed geography as an 8-character scope-prefixed code:
//! a scope letter (`N` national, `S` state, `M` metro) followed by seven
//! digits. Callers hand us looser inputs (a state abbreviation, a raw FIPS
//! or CBSA number, or an already-canonical code) and everything funnels
//! through [`normalize_area`] before an identifier is built.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Width of the digit portion of a canonical area code.
const AREA_DIGITS: usize = 7;

/// A geography scope embedded in a series identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Area {
    /// Nationwide, no geography filter.
    National,
    /// A US state, identified by its 2-digit FIPS code.
    State(String),
    /// A metropolitan area, identified by its 7-digit CBSA code.
    Metro(String),
}

impl Area {
    /// Returns the canonical 8-character scope-prefixed wire code.
    pub fn code(&self) -> String {
        match self {
            Area::National => format!("N{:0>width$}", "", width = AREA_DIGITS),
            Area::State(fips) => format!("S{:0<width$}", fips, width = AREA_DIGITS),
            Area::Metro(cbsa) => format!("M{:0>width$}", cbsa, width = AREA_DIGITS),
        }
    }

    /// Parses a canonical scope-prefixed code back into an [`Area`].
    ///
    /// Returns `None` for anything that is not exactly one scope letter
    /// followed by seven digits.
    pub fn parse_code(s: &str) -> Option<Area> {
        if s.len() != 1 + AREA_DIGITS {
            return None;
        }
        let digits = &s[1..];
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        match s.as_bytes()[0] {
            b'N' if digits == "0000000" => Some(Area::National),
            // Canonical state codes are the 2-digit FIPS padded with zeros.
            b'S' if &digits[2..] == "00000" => Some(Area::State(digits[..2].to_string())),
            b'M' => Some(Area::Metro(digits.to_string())),
            _ => None,
        }
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Area::National => write!(f, "national"),
            Area::State(fips) => write!(f, "state {}", fips),
            Area::Metro(cbsa) => write!(f, "metro {}", cbsa),
        }
    }
}

/// A state abbreviation that the resolver does not know.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown state abbreviation: {0}")]
pub struct UnknownState(pub String);

/// Maps human geography (state abbreviation, metro key) to [`Area`] codes.
///
/// Pure and synchronous. The codec treats a failed resolution as "no
/// geography filter available" and falls back to national scope.
pub trait AreaResolver: Send + Sync {
    /// Resolves a 2-letter state abbreviation to its FIPS-coded area.
    fn resolve_state(&self, abbrev: &str) -> Result<Area, UnknownState>;

    /// Resolves a metro lookup key (e.g. "new-york") to its CBSA-coded
    /// area, or `None` when the key is unknown.
    fn resolve_metro(&self, key: &str) -> Option<Area>;
}

/// Built-in resolver covering the 50 states, DC, and PR, plus a short
/// table of major metro areas. The full metro table lives upstream; this
/// is the subset the CLI needs to be usable without one.
#[derive(Debug, Default, Clone, Copy)]
pub struct UsAreaResolver;

impl AreaResolver for UsAreaResolver {
    fn resolve_state(&self, abbrev: &str) -> Result<Area, UnknownState> {
        let fips = match abbrev.to_ascii_uppercase().as_str() {
            "AL" => "01",
            "AK" => "02",
            "AZ" => "04",
            "AR" => "05",
            "CA" => "06",
            "CO" => "08",
            "CT" => "09",
            "DE" => "10",
            "DC" => "11",
            "FL" => "12",
            "GA" => "13",
            "HI" => "15",
            "ID" => "16",
            "IL" => "17",
            "IN" => "18",
            "IA" => "19",
            "KS" => "20",
            "KY" => "21",
            "LA" => "22",
            "ME" => "23",
            "MD" => "24",
            "MA" => "25",
            "MI" => "26",
            "MN" => "27",
            "MS" => "28",
            "MO" => "29",
            "MT" => "30",
            "NE" => "31",
            "NV" => "32",
            "NH" => "33",
            "NJ" => "34",
            "NM" => "35",
            "NY" => "36",
            "NC" => "37",
            "ND" => "38",
            "OH" => "39",
            "OK" => "40",
            "OR" => "41",
            "PA" => "42",
            "RI" => "44",
            "SC" => "45",
            "SD" => "46",
            "TN" => "47",
            "TX" => "48",
            "UT" => "49",
            "VT" => "50",
            "VA" => "51",
            "WA" => "53",
            "WV" => "54",
            "WI" => "55",
            "WY" => "56",
            "PR" => "72",
            _ => return Err(UnknownState(abbrev.to_string())),
        };
        Ok(Area::State(fips.to_string()))
    }

    fn resolve_metro(&self, key: &str) -> Option<Area> {
        let cbsa = match key.to_ascii_lowercase().as_str() {
            "new-york" => "0035620",
            "los-angeles" => "0031080",
            "chicago" => "0016980",
            "dallas" => "0019100",
            "houston" => "0026420",
            "washington" => "0047900",
            "philadelphia" => "0037980",
            "atlanta" => "0012060",
            "boston" => "0014460",
            "san-francisco" => "0041860",
            "seattle" => "0042660",
            "denver" => "0019740",
            _ => return None,
        };
        Some(Area::Metro(cbsa.to_string()))
    }
}

/// Normalizes a raw geography input into an [`Area`].
///
/// Accepts a bare 2-letter state abbreviation, a canonical scope-prefixed
/// code, or a raw numeric code (2-digit FIPS or 7-digit CBSA). Anything
/// unresolvable falls back to national scope.
pub fn normalize_area(raw: Option<&str>, resolver: &dyn AreaResolver) -> Area {
    let raw = match raw.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => return Area::National,
    };

    if raw.len() == 2 && raw.bytes().all(|b| b.is_ascii_alphabetic()) {
        return match resolver.resolve_state(raw) {
            Ok(area) => area,
            Err(e) => {
                tracing::debug!("{}, falling back to national scope", e);
                Area::National
            }
        };
    }

    if let Some(area) = Area::parse_code(raw) {
        return area;
    }

    if raw.bytes().all(|b| b.is_ascii_digit()) {
        return match raw.len() {
            1 | 2 => Area::State(format!("{:0>2}", raw)),
            7 => Area::Metro(raw.to_string()),
            _ => {
                tracing::debug!("unrecognized numeric area code {:?}, falling back to national scope", raw);
                Area::National
            }
        };
    }

    match resolver.resolve_metro(raw) {
        Some(area) => area,
        None => {
            tracing::debug!("unrecognized geography {:?}, falling back to national scope", raw);
            Area::National
        }
    }
}

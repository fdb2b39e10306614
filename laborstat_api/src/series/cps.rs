//! CPS labor-force series (`LN` prefix).
//!
//! Layout (11 characters): `LN` + seasonal(1) + measure(8).

use super::{all_digits, Seasonal, SeriesId};

const SERIES_LEN: usize = 11;

/// Civilian unemployment rate, 16 years and over.
pub const UNEMPLOYMENT_RATE_MEASURE: &str = "14000000";
/// Civilian employment level, thousands.
pub const EMPLOYMENT_LEVEL_MEASURE: &str = "12000000";
/// Labor-force participation rate.
pub const PARTICIPATION_RATE_MEASURE: &str = "11300000";

/// A decoded CPS series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnemploymentSeries {
    pub seasonal: Seasonal,
    /// 8-digit CPS measure code.
    pub measure: String,
}

impl UnemploymentSeries {
    /// Builds a seasonally adjusted series for the given measure code.
    pub fn adjusted(measure: &str) -> UnemploymentSeries {
        UnemploymentSeries {
            seasonal: Seasonal::Adjusted,
            measure: measure.to_string(),
        }
    }

    pub fn encode(&self) -> SeriesId {
        SeriesId::new(format!("LN{}{}", self.seasonal.letter(), self.measure))
    }

    pub(super) fn decode(id: &str) -> Option<UnemploymentSeries> {
        if id.len() != SERIES_LEN || !id.is_ascii() {
            return None;
        }
        let seasonal = Seasonal::from_letter(id.as_bytes()[2])?;
        let measure = &id[3..];
        if !all_digits(measure) {
            return None;
        }
        Some(UnemploymentSeries {
            seasonal,
            measure: measure.to_string(),
        })
    }
}

/// The headline unemployment-rate series (`LNS14000000`).
pub fn unemployment_rate() -> SeriesId {
    UnemploymentSeries::adjusted(UNEMPLOYMENT_RATE_MEASURE).encode()
}

/// The total-employment-level series (`LNS12000000`).
pub fn employment_level() -> SeriesId {
    UnemploymentSeries::adjusted(EMPLOYMENT_LEVEL_MEASURE).encode()
}

/// The labor-force-participation-rate series (`LNS11300000`).
pub fn participation_rate() -> SeriesId {
    UnemploymentSeries::adjusted(PARTICIPATION_RATE_MEASURE).encode()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_series_encode_to_expected_identifiers() {
        assert_eq!(unemployment_rate().as_str(), "LNS14000000");
        assert_eq!(employment_level().as_str(), "LNS12000000");
        assert_eq!(participation_rate().as_str(), "LNS11300000");
    }

    #[test]
    fn decode_round_trips() {
        let decoded = UnemploymentSeries::decode("LNU04000000").unwrap();
        assert_eq!(decoded.seasonal, Seasonal::Unadjusted);
        assert_eq!(decoded.measure, "04000000");
        assert_eq!(decoded.encode().as_str(), "LNU04000000");
    }

    #[test]
    fn decode_rejects_bad_layouts() {
        assert_eq!(UnemploymentSeries::decode("LNS1400000"), None);
        assert_eq!(UnemploymentSeries::decode("LNX14000000"), None);
        assert_eq!(UnemploymentSeries::decode("LNS1400000A"), None);
    }
}

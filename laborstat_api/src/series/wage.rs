//! OEWS wage and employment series (`OE` prefix).
//!
//! Layout (25 characters):
//! `OE` + seasonal(1) + area(8, scope-prefixed) + industry(6) +
//! occupation(6) + measure(2).

use crate::geography::Area;

use super::{all_digits, Seasonal, SeriesId};

/// Industry code meaning "all industries combined".
pub const CROSS_INDUSTRY: &str = "000000";

const SERIES_LEN: usize = 25;
const OCC_WIDTH: usize = 6;

/// The OEWS data-type code: which statistic of the occupation this series
/// measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WageMeasure {
    Employment,
    HourlyMean,
    AnnualMean,
    HourlyP10,
    HourlyP25,
    HourlyMedian,
    HourlyP75,
    HourlyP90,
    AnnualP10,
    AnnualP25,
    AnnualMedian,
    AnnualP75,
    AnnualP90,
}

impl WageMeasure {
    /// The 12 measures that make up the annual and hourly percentile
    /// ladders of a wage distribution (everything except `Employment`).
    pub const LADDER: [WageMeasure; 12] = [
        WageMeasure::HourlyMean,
        WageMeasure::AnnualMean,
        WageMeasure::HourlyP10,
        WageMeasure::HourlyP25,
        WageMeasure::HourlyMedian,
        WageMeasure::HourlyP75,
        WageMeasure::HourlyP90,
        WageMeasure::AnnualP10,
        WageMeasure::AnnualP25,
        WageMeasure::AnnualMedian,
        WageMeasure::AnnualP75,
        WageMeasure::AnnualP90,
    ];

    /// The 2-digit wire code for this measure.
    pub fn code(self) -> &'static str {
        match self {
            WageMeasure::Employment => "01",
            WageMeasure::HourlyMean => "03",
            WageMeasure::AnnualMean => "04",
            WageMeasure::HourlyP10 => "06",
            WageMeasure::HourlyP25 => "07",
            WageMeasure::HourlyMedian => "08",
            WageMeasure::HourlyP75 => "09",
            WageMeasure::HourlyP90 => "10",
            WageMeasure::AnnualP10 => "11",
            WageMeasure::AnnualP25 => "12",
            WageMeasure::AnnualMedian => "13",
            WageMeasure::AnnualP75 => "14",
            WageMeasure::AnnualP90 => "15",
        }
    }

    /// Parses a 2-digit wire code back into a measure.
    pub fn from_code(code: &str) -> Option<WageMeasure> {
        Some(match code {
            "01" => WageMeasure::Employment,
            "03" => WageMeasure::HourlyMean,
            "04" => WageMeasure::AnnualMean,
            "06" => WageMeasure::HourlyP10,
            "07" => WageMeasure::HourlyP25,
            "08" => WageMeasure::HourlyMedian,
            "09" => WageMeasure::HourlyP75,
            "10" => WageMeasure::HourlyP90,
            "11" => WageMeasure::AnnualP10,
            "12" => WageMeasure::AnnualP25,
            "13" => WageMeasure::AnnualMedian,
            "14" => WageMeasure::AnnualP75,
            "15" => WageMeasure::AnnualP90,
            _ => return None,
        })
    }
}

/// Normalizes an SOC occupation code for embedding: separators stripped,
/// right-padded with zeros to six characters.
///
/// `"15-1252"` becomes `"151252"`, `"29-1"` becomes `"291000"`.
pub fn normalize_occupation(code: &str) -> String {
    let mut digits: String = code.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.truncate(OCC_WIDTH);
    format!("{:0<width$}", digits, width = OCC_WIDTH)
}

/// A decoded OEWS series: occupation x geography x industry x measure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WageSeries {
    pub seasonal: Seasonal,
    pub area: Area,
    /// 6-digit NAICS-style industry code; [`CROSS_INDUSTRY`] when unfiltered.
    pub industry: String,
    /// Normalized 6-character occupation code.
    pub occupation: String,
    pub measure: WageMeasure,
}

impl WageSeries {
    /// Builds a series for the given occupation and measure. The industry
    /// defaults to cross-industry when omitted; OEWS data is unadjusted.
    pub fn new(
        occupation: &str,
        measure: WageMeasure,
        area: Area,
        industry: Option<&str>,
    ) -> WageSeries {
        WageSeries {
            seasonal: Seasonal::Unadjusted,
            area,
            industry: industry.unwrap_or(CROSS_INDUSTRY).to_string(),
            occupation: normalize_occupation(occupation),
            measure,
        }
    }

    pub fn encode(&self) -> SeriesId {
        SeriesId::new(format!(
            "OE{}{}{}{}{}",
            self.seasonal.letter(),
            self.area.code(),
            self.industry,
            self.occupation,
            self.measure.code(),
        ))
    }

    pub(super) fn decode(id: &str) -> Option<WageSeries> {
        if id.len() != SERIES_LEN || !id.is_ascii() {
            return None;
        }
        let seasonal = Seasonal::from_letter(id.as_bytes()[2])?;
        let area = Area::parse_code(&id[3..11])?;
        let industry = &id[11..17];
        let occupation = &id[17..23];
        if !all_digits(industry) || !all_digits(occupation) {
            return None;
        }
        let measure = WageMeasure::from_code(&id[23..25])?;
        Some(WageSeries {
            seasonal,
            area,
            industry: industry.to_string(),
            occupation: occupation.to_string(),
            measure,
        })
    }
}

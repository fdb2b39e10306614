//! JOLTS job-openings and labor-turnover series (`JT` prefix).
//!
//! Layout (21 characters):
//! `JT` + seasonal(1) + industry(6) + state(2) + area(5) + size class(2) +
//! data element(2) + rate/level(1).

use super::{all_digits, Seasonal, SeriesId};

const SERIES_LEN: usize = 21;

/// Which turnover statistic the series reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataElement {
    JobOpenings,
    Quits,
    Hires,
    TotalSeparations,
    Layoffs,
}

impl DataElement {
    fn code(self) -> &'static str {
        match self {
            DataElement::JobOpenings => "JO",
            DataElement::Quits => "QU",
            DataElement::Hires => "HI",
            DataElement::TotalSeparations => "TS",
            DataElement::Layoffs => "LD",
        }
    }

    fn from_code(code: &str) -> Option<DataElement> {
        Some(match code {
            "JO" => DataElement::JobOpenings,
            "QU" => DataElement::Quits,
            "HI" => DataElement::Hires,
            "TS" => DataElement::TotalSeparations,
            "LD" => DataElement::Layoffs,
            _ => return None,
        })
    }
}

/// Whether the series reports a rate (percent) or a level (thousands).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RateOrLevel {
    Rate,
    Level,
}

impl RateOrLevel {
    fn letter(self) -> char {
        match self {
            RateOrLevel::Rate => 'R',
            RateOrLevel::Level => 'L',
        }
    }

    fn from_letter(c: u8) -> Option<RateOrLevel> {
        match c {
            b'R' => Some(RateOrLevel::Rate),
            b'L' => Some(RateOrLevel::Level),
            _ => None,
        }
    }
}

/// A decoded JOLTS series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpeningsSeries {
    pub seasonal: Seasonal,
    /// 6-digit industry code, `000000` for total nonfarm.
    pub industry: String,
    /// 2-digit state FIPS code, `00` for nationwide.
    pub state: String,
    /// 5-digit area code within the state, `00000` for statewide.
    pub area: String,
    /// 2-digit establishment size class, `00` for all sizes.
    pub size_class: String,
    pub element: DataElement,
    pub form: RateOrLevel,
}

impl OpeningsSeries {
    /// Builds the national total-nonfarm series for the given element.
    pub fn national(element: DataElement, form: RateOrLevel) -> OpeningsSeries {
        OpeningsSeries {
            seasonal: Seasonal::Adjusted,
            industry: "000000".to_string(),
            state: "00".to_string(),
            area: "00000".to_string(),
            size_class: "00".to_string(),
            element,
            form,
        }
    }

    pub fn encode(&self) -> SeriesId {
        SeriesId::new(format!(
            "JT{}{}{}{}{}{}{}",
            self.seasonal.letter(),
            self.industry,
            self.state,
            self.area,
            self.size_class,
            self.element.code(),
            self.form.letter(),
        ))
    }

    pub(super) fn decode(id: &str) -> Option<OpeningsSeries> {
        if id.len() != SERIES_LEN || !id.is_ascii() {
            return None;
        }
        let seasonal = Seasonal::from_letter(id.as_bytes()[2])?;
        let industry = &id[3..9];
        let state = &id[9..11];
        let area = &id[11..16];
        let size_class = &id[16..18];
        if ![industry, state, area, size_class].iter().all(|p| all_digits(p)) {
            return None;
        }
        let element = DataElement::from_code(&id[18..20])?;
        let form = RateOrLevel::from_letter(id.as_bytes()[20])?;
        Some(OpeningsSeries {
            seasonal,
            industry: industry.to_string(),
            state: state.to_string(),
            area: area.to_string(),
            size_class: size_class.to_string(),
            element,
            form,
        })
    }
}

/// Total nonfarm job openings, level in thousands, seasonally adjusted.
pub fn job_openings_level() -> SeriesId {
    OpeningsSeries::national(DataElement::JobOpenings, RateOrLevel::Level).encode()
}

/// Total nonfarm quits rate, seasonally adjusted.
pub fn quits_rate() -> SeriesId {
    OpeningsSeries::national(DataElement::Quits, RateOrLevel::Rate).encode()
}

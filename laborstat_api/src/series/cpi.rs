//! CPI urban price-index series (`CU` prefix).
//!
//! Layout (at least 11 characters):
//! `CU` + seasonal(1) + periodicity(1) + area(4) + item(3+).

use super::{all_digits, Seasonal, SeriesId};

const MIN_SERIES_LEN: usize = 11;

/// How often the index is published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Periodicity {
    /// Monthly (`R`).
    Monthly,
    /// Semiannual (`S`).
    Semiannual,
}

impl Periodicity {
    fn letter(self) -> char {
        match self {
            Periodicity::Monthly => 'R',
            Periodicity::Semiannual => 'S',
        }
    }

    fn from_letter(c: u8) -> Option<Periodicity> {
        match c {
            b'R' => Some(Periodicity::Monthly),
            b'S' => Some(Periodicity::Semiannual),
            _ => None,
        }
    }
}

/// A decoded CPI series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceIndexSeries {
    pub seasonal: Seasonal,
    pub periodicity: Periodicity,
    /// 4-digit CPI area code, `0000` for US city average.
    pub area: String,
    /// Item code, e.g. `SA0` for all items.
    pub item: String,
}

impl PriceIndexSeries {
    pub fn encode(&self) -> SeriesId {
        SeriesId::new(format!(
            "CU{}{}{}{}",
            self.seasonal.letter(),
            self.periodicity.letter(),
            self.area,
            self.item,
        ))
    }

    pub(super) fn decode(id: &str) -> Option<PriceIndexSeries> {
        if id.len() < MIN_SERIES_LEN || !id.is_ascii() {
            return None;
        }
        let seasonal = Seasonal::from_letter(id.as_bytes()[2])?;
        let periodicity = Periodicity::from_letter(id.as_bytes()[3])?;
        let area = &id[4..8];
        if !all_digits(area) {
            return None;
        }
        let item = &id[8..];
        if !item.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return None;
        }
        Some(PriceIndexSeries {
            seasonal,
            periodicity,
            area: area.to_string(),
            item: item.to_string(),
        })
    }
}

/// CPI-U all items, US city average, not seasonally adjusted
/// (`CUUR0000SA0`). The YoY change of this index is the headline
/// inflation figure.
pub fn cpi_all_items() -> SeriesId {
    PriceIndexSeries {
        seasonal: Seasonal::Unadjusted,
        periodicity: Periodicity::Monthly,
        area: "0000".to_string(),
        item: "SA0".to_string(),
    }
    .encode()
}

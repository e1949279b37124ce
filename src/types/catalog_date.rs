use chrono::{Datelike, NaiveDate};
use std::fmt;

/// Year used in place of a missing or unparseable coverage-end date.
/// A blank end date means the station is still reporting.
pub const ACTIVE_END_YEAR: i32 = 9999;

/// Year used in place of a missing or unparseable coverage-begin date.
pub const UNKNOWN_BEGIN_YEAR: i32 = 0;

/// A `BEGIN`/`END` cell from the station catalog.
///
/// The catalog stores dates as `YYYYMMDD` strings, with blank `END` cells for stations
/// that are still active. Eight digits that do not form a calendar date (`20001301`)
/// still carry a usable year and become [`CatalogDate::Digits`]. Anything else is kept
/// verbatim as [`CatalogDate::Unparseable`] so callers can tell a bad cell apart from a date.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CatalogDate {
    Blank,
    Date(NaiveDate),
    Digits { year: i32, month: u32, day: u32 },
    Unparseable(String),
}

impl CatalogDate {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return CatalogDate::Blank;
        }
        if raw.len() != 8 || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return CatalogDate::Unparseable(raw.to_string());
        }

        // Slicing is safe, the string is 8 ASCII digits.
        let year = raw[0..4].parse::<i32>();
        let month = raw[4..6].parse::<u32>();
        let day = raw[6..8].parse::<u32>();
        match (year, month, day) {
            (Ok(year), Ok(month), Ok(day)) => NaiveDate::from_ymd_opt(year, month, day)
                .map(CatalogDate::Date)
                .unwrap_or(CatalogDate::Digits { year, month, day }),
            _ => CatalogDate::Unparseable(raw.to_string()),
        }
    }

    pub fn year(&self) -> Option<i32> {
        match self {
            CatalogDate::Date(date) => Some(date.year()),
            CatalogDate::Digits { year, .. } => Some(*year),
            _ => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, CatalogDate::Blank)
    }

    /// Year this date contributes when used as the start of a coverage interval.
    pub fn begin_year(&self) -> i32 {
        self.year().unwrap_or(UNKNOWN_BEGIN_YEAR)
    }

    /// Year this date contributes when used as the end of a coverage interval.
    pub fn end_year(&self) -> i32 {
        self.year().unwrap_or(ACTIVE_END_YEAR)
    }
}

impl fmt::Display for CatalogDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogDate::Blank => write!(f, ""),
            CatalogDate::Date(date) => write!(f, "{}", date.format("%Y%m%d")),
            CatalogDate::Digits { year, month, day } => {
                write!(f, "{:04}{:02}{:02}", year, month, day)
            }
            CatalogDate::Unparseable(raw) => write!(f, "{}", raw),
        }
    }
}

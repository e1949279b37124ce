//! Inclusive year ranges used both for the requested download window and for
//! the coverage interval of catalog rows.

use std::ops::RangeInclusive;
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Invalid year range {start}..={end}: start year is after end year")]
pub struct InvalidYearRange {
    pub start: i32,
    pub end: i32,
}

/// An inclusive `[start, end]` range of calendar years.
///
/// Construction guarantees `start <= end`.
///
/// # Examples
///
/// ```
/// use isd_downloader::YearRange;
///
/// let years = YearRange::new(2019, 2024).unwrap();
/// assert!(years.overlaps(1973, 9999));
/// assert!(!years.overlaps(1950, 2018));
/// assert_eq!(years.iter().count(), 6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct YearRange {
    start: i32,
    end: i32,
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> Result<Self, InvalidYearRange> {
        if start > end {
            return Err(InvalidYearRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> i32 {
        self.start
    }

    pub fn end(&self) -> i32 {
        self.end
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.start..=self.end).contains(&year)
    }

    /// Returns `true` if the closed interval `[begin, end]` shares at least one year with this range.
    pub fn overlaps(&self, begin: i32, end: i32) -> bool {
        !(end < self.start || begin > self.end)
    }

    /// Years in ascending order.
    pub fn iter(&self) -> RangeInclusive<i32> {
        self.start..=self.end
    }
}

impl IntoIterator for YearRange {
    type Item = i32;
    type IntoIter = RangeInclusive<i32>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

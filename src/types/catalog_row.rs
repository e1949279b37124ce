use crate::types::catalog_date::CatalogDate;

/// One row of the ISD station history catalog (`isd-history.csv`).
///
/// All cells are kept as the trimmed strings found in the catalog; interpretation
/// (padding, date parsing) happens during station selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRow {
    /// ICAO airport code, often empty.
    pub icao: String,
    /// Air Force station identifier, 6 digits once zero-padded.
    pub usaf: String,
    /// Weather Bureau Army Navy identifier, 5 digits once zero-padded.
    pub wban: String,
    pub name: String,
    /// Coverage begin, `YYYYMMDD` or empty.
    pub begin: String,
    /// Coverage end, `YYYYMMDD` or empty while the station is active.
    pub end: String,
}

impl CatalogRow {
    pub fn begin_date(&self) -> CatalogDate {
        CatalogDate::parse(&self.begin)
    }

    pub fn end_date(&self) -> CatalogDate {
        CatalogDate::parse(&self.end)
    }

    /// The `(begin_year, end_year)` coverage interval of this row.
    ///
    /// Blank or unparseable begin dates count as year 0 and blank or unparseable
    /// end dates as still active, so questionable rows widen rather than shrink.
    pub fn coverage_years(&self) -> (i32, i32) {
        (self.begin_date().begin_year(), self.end_date().end_year())
    }
}

//! Picks the catalog row that best represents an airport for a range of years.
//!
//! Catalogs list several historical station ids for busy airports. Among the rows
//! for the requested code whose coverage overlaps the requested years, the one with
//! the latest coverage end wins, then the latest coverage begin. Remaining ties go
//! to the row that comes first in the catalog and are logged for manual review.

use crate::types::catalog_row::CatalogRow;
use crate::types::resolved_station::ResolvedStation;
use crate::types::year_range::YearRange;
use log::warn;
use std::cmp::Reverse;

pub const USAF_WIDTH: usize = 6;
pub const WBAN_WIDTH: usize = 5;

/// Normalizes an airport code for comparison.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Left-pads `raw` (trimmed) with zeros to `width`. Longer values are returned unchanged.
pub fn zero_pad(raw: &str, width: usize) -> String {
    format!("{:0>width$}", raw.trim(), width = width)
}

fn is_numeric(id: &str) -> bool {
    !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit())
}

/// `(end_year, begin_year)`, compared descending.
fn rank_key(row: &CatalogRow) -> (i32, i32) {
    let (begin, end) = row.coverage_years();
    (end, begin)
}

/// Returns every row for `icao` whose coverage interval overlaps `years`, in catalog order.
pub fn candidates<'a>(rows: &'a [CatalogRow], icao: &str, years: YearRange) -> Vec<&'a CatalogRow> {
    let icao = normalize_code(icao);
    rows.iter()
        .filter(|row| normalize_code(&row.icao) == icao)
        .filter(|row| {
            let (begin, end) = row.coverage_years();
            years.overlaps(begin, end)
        })
        .collect()
}

/// Resolves `icao` to a single station, or `None` if no usable row exists.
///
/// The result depends only on `rows`, `icao` and `years`.
pub fn select_station(rows: &[CatalogRow], icao: &str, years: YearRange) -> Option<ResolvedStation> {
    let candidates = candidates(rows, icao, years);

    // min_by_key keeps the first of equal elements.
    let best = candidates
        .iter()
        .copied()
        .min_by_key(|row| Reverse(rank_key(row)))?;

    let code = normalize_code(icao);
    let best_key = rank_key(best);
    let tied: Vec<String> = candidates
        .iter()
        .filter(|row| rank_key(row) == best_key)
        .map(|row| format!("{}-{}", row.usaf, row.wban))
        .collect();
    if tied.len() > 1 {
        warn!(
            "{}: {} equally ranked stations ({}), using the first; review manually",
            code,
            tied.len(),
            tied.join(", ")
        );
    }

    let usaf = zero_pad(&best.usaf, USAF_WIDTH);
    let wban = zero_pad(&best.wban, WBAN_WIDTH);
    if !is_numeric(&usaf) || !is_numeric(&wban) {
        warn!(
            "{}: catalog row has non-numeric identifiers (USAF '{}', WBAN '{}')",
            code, best.usaf, best.wban
        );
        return None;
    }

    Some(ResolvedStation::new(
        &code, usaf, wban, &best.name, &best.begin, &best.end,
    ))
}

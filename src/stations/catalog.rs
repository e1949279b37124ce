//! Downloading and parsing the ISD station history catalog (`isd-history.csv`).

use crate::stations::error::CatalogError;
use crate::types::catalog_row::CatalogRow;
use crate::weather_data::fetcher::Fetcher;
use crate::weather_data::retry::Sleeper;
use crate::weather_data::transport::Transport;
use log::{info, warn};
use polars::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;
use tokio::task;

pub const ICAO_COLUMN: &str = "ICAO";
pub const USAF_COLUMN: &str = "USAF";
pub const WBAN_COLUMN: &str = "WBAN";
pub const NAME_COLUMN: &str = "STATION NAME";
pub const BEGIN_COLUMN: &str = "BEGIN";
pub const END_COLUMN: &str = "END";

/// Downloads the catalog at `url` and parses it into rows.
///
/// # Errors
///
/// Any error here is fatal for a run: without the catalog no station can be resolved.
/// A catalog that downloads but holds no data rows is reported as [`CatalogError::Empty`].
pub async fn load_catalog<T: Transport, S: Sleeper>(
    fetcher: &Fetcher<T, S>,
    url: &str,
) -> Result<Vec<CatalogRow>, CatalogError> {
    info!("Downloading station catalog: {}", url);
    let raw = fetcher
        .fetch_bytes(url)
        .await
        .map_err(|source| CatalogError::Unavailable {
            url: url.to_string(),
            source,
        })?;

    let rows = parse_catalog(raw).await?;
    if rows.is_empty() {
        return Err(CatalogError::Empty {
            url: url.to_string(),
        });
    }
    info!("Loaded {} station catalog rows", rows.len());
    Ok(rows)
}

/// Parses catalog CSV bytes (with header) on the blocking pool.
pub async fn parse_catalog(bytes: Vec<u8>) -> Result<Vec<CatalogRow>, CatalogError> {
    task::spawn_blocking(move || parse_catalog_blocking(&bytes)).await?
}

fn parse_catalog_blocking(bytes: &[u8]) -> Result<Vec<CatalogRow>, CatalogError> {
    let mut temp_file = NamedTempFile::new().map_err(CatalogError::CsvIo)?;
    temp_file.write_all(bytes).map_err(CatalogError::CsvIo)?;
    temp_file.flush().map_err(CatalogError::CsvIo)?;

    // Schema inference is off so every column stays a string; identifiers keep their leading zeros.
    // Invalid UTF-8 in station names is replaced rather than rejected.
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .with_parse_options(CsvParseOptions::default().with_encoding(CsvEncoding::LossyUtf8))
        .try_into_reader_with_file_path(Some(temp_file.path().to_path_buf()))?
        .finish()?;

    let icao = string_column(&df, ICAO_COLUMN)?;
    let usaf = string_column(&df, USAF_COLUMN)?;
    let wban = string_column(&df, WBAN_COLUMN)?;
    let begin = string_column(&df, BEGIN_COLUMN)?;
    let end = string_column(&df, END_COLUMN)?;
    let name = match string_column(&df, NAME_COLUMN) {
        Ok(column) => Some(column),
        Err(CatalogError::MissingColumn(_)) => {
            warn!("Station catalog has no '{}' column, names will be empty", NAME_COLUMN);
            None
        }
        Err(e) => return Err(e),
    };

    let rows = (0..df.height())
        .map(|idx| CatalogRow {
            icao: cell(icao, idx),
            usaf: cell(usaf, idx),
            wban: cell(wban, idx),
            name: name.map(|column| cell(column, idx)).unwrap_or_default(),
            begin: cell(begin, idx),
            end: cell(end, idx),
        })
        .collect();
    Ok(rows)
}

fn string_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a StringChunked, CatalogError> {
    let column = df
        .column(name)
        .map_err(|_| CatalogError::MissingColumn(name.to_string()))?;
    Ok(column.str()?)
}

fn cell(column: &StringChunked, idx: usize) -> String {
    column.get(idx).unwrap_or("").trim().to_string()
}

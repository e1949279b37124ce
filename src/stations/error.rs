use crate::weather_data::error::FetchError;
use polars::error::PolarsError;
use thiserror::Error;

/// Failures loading the station catalog. All of them abort the run.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to download station catalog from {url}")]
    Unavailable {
        url: String,
        #[source]
        source: FetchError,
    },

    #[error("Station catalog from {url} contains no rows")]
    Empty { url: String },

    #[error("I/O error buffering the station catalog")]
    CsvIo(#[source] std::io::Error),

    #[error("Failed to parse the station catalog CSV")]
    CsvParse(#[from] PolarsError),

    #[error("Station catalog is missing required column '{0}'")]
    MissingColumn(String),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}

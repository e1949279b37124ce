use crate::stations::error::CatalogError;
use crate::types::year_range::InvalidYearRange;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a whole run.
#[derive(Debug, Error)]
pub enum IsdDownloaderError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    InvalidYearRange(#[from] InvalidYearRange),

    #[error("Failed to create output directory '{0}'")]
    OutputDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),
}

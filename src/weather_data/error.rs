use crate::weather_data::transport::BoxError;
use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

/// Why a single request attempt was rejected. Always retried.
#[derive(Debug, Error)]
pub enum AttemptError {
    #[error("error {source}")]
    NetworkRequest {
        #[source]
        source: BoxError,
    },

    #[error("HTTP {} (len={len})", .status.as_u16())]
    HttpStatus { status: StatusCode, len: usize },

    #[error("HTTP {} with empty body (len={len})", .status.as_u16())]
    EmptyBody { status: StatusCode, len: usize },
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Giving up on {url} after {attempts} attempts")]
    Exhausted {
        url: String,
        attempts: u32,
        #[source]
        last: AttemptError,
    },
}

/// Why an observation file could not be obtained.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Failed to write observation file '{0}'")]
    Write(PathBuf, #[source] std::io::Error),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}

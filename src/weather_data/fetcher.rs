use crate::types::resolved_station::ResolvedStation;
use crate::utils::{observation_file_path, observation_url};
use crate::weather_data::error::{AttemptError, DownloadError, FetchError};
use crate::weather_data::retry::{RetryPolicy, Sleeper};
use crate::weather_data::transport::Transport;
use log::{info, warn};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::{fs, task};

/// What happened to one `(airport code, year)` observation file.
#[derive(Debug)]
pub enum DownloadOutcome {
    Saved { path: PathBuf, bytes: usize },
    /// A non-empty file was already on disk; no request was made.
    Skipped { path: PathBuf },
    Failed { url: String, error: DownloadError },
}

/// Downloads with bounded retries over a [`Transport`].
pub struct Fetcher<T, S> {
    transport: T,
    sleeper: S,
    policy: RetryPolicy,
}

impl<T: Transport, S: Sleeper> Fetcher<T, S> {
    pub fn new(transport: T, sleeper: S, policy: RetryPolicy) -> Self {
        Self {
            transport,
            sleeper,
            policy,
        }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// GETs `url` until a successful, non-blank response arrives or the retry policy gives up.
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.policy
            .run(&self.sleeper, move |_attempt| self.attempt(url))
            .await
            .map_err(|e| FetchError::Exhausted {
                url: url.to_string(),
                attempts: e.attempts,
                last: e.last,
            })
    }

    async fn attempt(&self, url: &str) -> Result<Vec<u8>, AttemptError> {
        let response = self
            .transport
            .get(url)
            .await
            .map_err(|source| AttemptError::NetworkRequest { source })?;

        if !response.status.is_success() {
            return Err(AttemptError::HttpStatus {
                status: response.status,
                len: response.body.len(),
            });
        }
        if !response.has_content() {
            return Err(AttemptError::EmptyBody {
                status: response.status,
                len: response.body.len(),
            });
        }
        Ok(response.body)
    }

    /// Downloads one year of observations for `station` into `destination_dir`.
    ///
    /// An existing non-empty destination file short-circuits to
    /// [`DownloadOutcome::Skipped`] without touching the network. The file is only
    /// written once the whole body has been received, and it replaces any previous
    /// (empty) file in one rename.
    pub async fn download_year(
        &self,
        base_url: &str,
        station: &ResolvedStation,
        year: i32,
        destination_dir: &Path,
    ) -> DownloadOutcome {
        let icao = &station.icao;
        let path = observation_file_path(destination_dir, icao, year);

        if let Ok(metadata) = fs::metadata(&path).await {
            if metadata.is_file() && metadata.len() > 0 {
                info!("[{} {}] exists, skipping", icao, year);
                return DownloadOutcome::Skipped { path };
            }
        }

        let url = observation_url(base_url, year, &station.station_id);
        info!("[{} {}] GET {}", icao, year, url);

        let bytes = match self.fetch_bytes(&url).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("[{} {}] not available: {}", icao, year, e);
                return DownloadOutcome::Failed {
                    url,
                    error: e.into(),
                };
            }
        };

        let len = bytes.len();
        match write_file(bytes, path.clone()).await {
            Ok(()) => {
                info!("[{} {}] saved {} ({} bytes)", icao, year, path.display(), len);
                DownloadOutcome::Saved { path, bytes: len }
            }
            Err(e) => {
                warn!("[{} {}] {}", icao, year, e);
                DownloadOutcome::Failed { url, error: e }
            }
        }
    }
}

/// Writes `bytes` to a temp file next to `path`, then renames it over `path`.
async fn write_file(bytes: Vec<u8>, path: PathBuf) -> Result<(), DownloadError> {
    task::spawn_blocking(move || {
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        let mut temp_file =
            NamedTempFile::new_in(dir).map_err(|e| DownloadError::Write(path.clone(), e))?;
        temp_file
            .write_all(&bytes)
            .map_err(|e| DownloadError::Write(path.clone(), e))?;
        temp_file
            .flush()
            .map_err(|e| DownloadError::Write(path.clone(), e))?;
        temp_file
            .persist(&path)
            .map_err(|e| DownloadError::Write(path.clone(), e.error))?;
        Ok::<(), DownloadError>(())
    })
    .await?
}

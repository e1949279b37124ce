//! Ties resolver and fetcher together into one sequential run.

use crate::config::DownloadConfig;
use crate::error::IsdDownloaderError;
use crate::stations::catalog::load_catalog;
use crate::stations::error::CatalogError;
use crate::stations::select_station::select_station;
use crate::types::catalog_row::CatalogRow;
use crate::types::resolved_station::StationMapping;
use crate::utils::ensure_output_dir_exists;
use crate::weather_data::fetcher::{DownloadOutcome, Fetcher};
use crate::weather_data::retry::{Sleeper, TokioSleeper};
use crate::weather_data::transport::{ReqwestTransport, Transport};
use chrono::{DateTime, SecondsFormat, Utc};
use log::{info, warn};

/// Counts of what a run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub resolved: usize,
    /// Codes with no usable catalog row, in configured order.
    pub unresolved: Vec<String>,
    pub saved: usize,
    pub skipped: usize,
    pub failed: usize,
    pub finished_at: DateTime<Utc>,
}

/// Resolves the configured airport codes to stations and downloads their yearly files.
///
/// # Examples
///
/// ```no_run
/// use isd_downloader::{DownloadConfig, IsdDownloader, IsdDownloaderError};
///
/// # async fn run() -> Result<(), IsdDownloaderError> {
/// let downloader = IsdDownloader::new(DownloadConfig::builder().build()?)?;
/// let summary = downloader.run().await?;
/// println!("{} files saved", summary.saved);
/// # Ok(())
/// # }
/// ```
pub struct IsdDownloader<T = ReqwestTransport, S = TokioSleeper> {
    config: DownloadConfig,
    fetcher: Fetcher<T, S>,
}

impl IsdDownloader {
    /// Uses a `reqwest` client with the configured timeout and real sleeps.
    pub fn new(config: DownloadConfig) -> Result<Self, IsdDownloaderError> {
        let transport =
            ReqwestTransport::new(config.timeout()).map_err(IsdDownloaderError::HttpClient)?;
        Ok(Self::with_parts(config, transport, TokioSleeper))
    }
}

impl<T: Transport, S: Sleeper> IsdDownloader<T, S> {
    pub fn with_parts(config: DownloadConfig, transport: T, sleeper: S) -> Self {
        let fetcher = Fetcher::new(transport, sleeper, config.retry_policy());
        Self { config, fetcher }
    }

    pub fn config(&self) -> &DownloadConfig {
        &self.config
    }

    /// Runs everything: output directory, catalog, resolution, downloads.
    ///
    /// # Errors
    ///
    /// Only an unusable output directory or catalog fails the run. Unresolved codes
    /// and failed years are logged and counted in the returned [`RunSummary`].
    pub async fn run(&self) -> Result<RunSummary, IsdDownloaderError> {
        let output_dir = self.config.output_dir();
        ensure_output_dir_exists(output_dir)
            .await
            .map_err(|e| IsdDownloaderError::OutputDirCreation(output_dir.to_path_buf(), e))?;

        let rows = self.load_catalog().await?;
        let (mapping, unresolved) = self.resolve_all(&rows);

        let (mut saved, mut skipped, mut failed) = (0, 0, 0);
        for outcome in self.download_all(&mapping).await {
            match outcome {
                DownloadOutcome::Saved { .. } => saved += 1,
                DownloadOutcome::Skipped { .. } => skipped += 1,
                DownloadOutcome::Failed { .. } => failed += 1,
            }
        }

        let summary = RunSummary {
            resolved: mapping.len(),
            unresolved,
            saved,
            skipped,
            failed,
            finished_at: Utc::now(),
        };
        info!(
            "Done: {} UTC ({} saved, {} skipped, {} failed, {} codes unresolved)",
            summary.finished_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            summary.saved,
            summary.skipped,
            summary.failed,
            summary.unresolved.len()
        );
        Ok(summary)
    }

    pub async fn load_catalog(&self) -> Result<Vec<CatalogRow>, CatalogError> {
        load_catalog(&self.fetcher, self.config.catalog_url()).await
    }

    /// Resolves every configured code. Returns the mapping and the codes that could not be resolved.
    pub fn resolve_all(&self, rows: &[CatalogRow]) -> (StationMapping, Vec<String>) {
        let mut mapping = StationMapping::new();
        let mut unresolved = Vec::new();

        info!("Resolved stations:");
        for icao in self.config.airport_codes() {
            match select_station(rows, icao, self.config.years()) {
                Some(station) => {
                    info!("  {} -> {}", icao, station);
                    mapping.insert(station);
                }
                None => {
                    warn!("  {}: not found in station catalog", icao);
                    unresolved.push(icao.clone());
                }
            }
        }
        (mapping, unresolved)
    }

    /// Downloads every configured year for every mapped station, one at a time:
    /// stations in mapping order, years ascending.
    pub async fn download_all(&self, mapping: &StationMapping) -> Vec<DownloadOutcome> {
        let mut outcomes = Vec::new();
        for station in mapping {
            for year in self.config.years() {
                let outcome = self
                    .fetcher
                    .download_year(
                        self.config.data_base_url(),
                        station,
                        year,
                        self.config.output_dir(),
                    )
                    .await;
                outcomes.push(outcome);
            }
        }
        outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{FakeTransport, RecordingSleeper};
    use reqwest::StatusCode;
    use std::path::Path;
    use std::time::Duration;

    const CATALOG_URL: &str = "https://catalog.test/isd-history.csv";
    const DATA_URL: &str = "https://data.test/access";

    const CATALOG: &str = "\
USAF,WBAN,STATION NAME,CTRY,STATE,ICAO,BEGIN,END
13960,13960,DALLAS LOVE FIELD,US,TX,KDAL,19730101,
722580,13960,DALLAS LOVE FLD OLD,US,TX,KDAL,19450101,19721231
725340,14819,CHICAGO MIDWAY,US,IL,kmdw,19730101,
";

    fn config(output_dir: &Path) -> DownloadConfig {
        DownloadConfig::builder()
            .airport_codes(vec!["KDAL".into(), "KMDW".into(), "KZZZ".into()])
            .first_year(2020)
            .last_year(2021)
            .output_dir(output_dir)
            .catalog_url(CATALOG_URL)
            .data_base_url(DATA_URL)
            .backoff_base(Duration::from_secs(2))
            .build()
            .unwrap()
    }

    fn transport() -> FakeTransport {
        FakeTransport::new()
            .with_reply(CATALOG_URL, StatusCode::OK, CATALOG)
            .with_reply(
                &format!("{}/2020/01396013960.csv", DATA_URL),
                StatusCode::OK,
                "kdal 2020",
            )
            .with_reply(
                &format!("{}/2021/01396013960.csv", DATA_URL),
                StatusCode::OK,
                "kdal 2021",
            )
            .with_reply(
                &format!("{}/2020/72534014819.csv", DATA_URL),
                StatusCode::OK,
                "kmdw 2020",
            )
        // KMDW 2021 is unrouted and answers 404.
    }

    #[tokio::test]
    async fn test_end_to_end_run() {
        let dir = tempfile::tempdir().unwrap();
        let output_dir = dir.path().join("downloads");
        let transport = transport();
        let sleeper = RecordingSleeper::default();
        let downloader = IsdDownloader::with_parts(config(&output_dir), &transport, &sleeper);
        let started_at = Utc::now();

        let summary = downloader.run().await.unwrap();

        assert!(summary.finished_at >= started_at);
        assert!(summary.finished_at <= Utc::now());

        assert_eq!(summary.resolved, 2);
        assert_eq!(summary.unresolved, vec!["KZZZ".to_string()]);
        assert_eq!(summary.saved, 3);
        assert_eq!(summary.skipped, 0);
        assert_eq!(summary.failed, 1);

        assert_eq!(
            std::fs::read(output_dir.join("KDAL_2020.csv")).unwrap(),
            b"kdal 2020"
        );
        assert_eq!(
            std::fs::read(output_dir.join("KMDW_2020.csv")).unwrap(),
            b"kmdw 2020"
        );
        assert!(!output_dir.join("KMDW_2021.csv").exists());

        // Catalog once, KDAL x2, KMDW 2020 once, KMDW 2021 three times.
        let calls = transport.calls();
        assert_eq!(calls.len(), 1 + 2 + 1 + 3);
        assert_eq!(calls[0], CATALOG_URL);
        assert_eq!(calls[1], format!("{}/2020/01396013960.csv", DATA_URL));
        assert_eq!(calls[2], format!("{}/2021/01396013960.csv", DATA_URL));
        assert_eq!(
            transport.call_count(&format!("{}/2021/72534014819.csv", DATA_URL)),
            3
        );
    }

    #[tokio::test]
    async fn test_second_run_makes_no_observation_requests() {
        let dir = tempfile::tempdir().unwrap();
        let transport = transport();
        let sleeper = RecordingSleeper::default();
        let downloader = IsdDownloader::with_parts(config(dir.path()), &transport, &sleeper);

        downloader.run().await.unwrap();
        transport.reset_calls();

        let summary = downloader.run().await.unwrap();
        assert_eq!(summary.skipped, 3);
        assert_eq!(summary.saved, 0);
        // Only the catalog and the year that failed the first time are requested again.
        let calls = transport.calls();
        assert_eq!(calls[0], CATALOG_URL);
        assert!(calls[1..]
            .iter()
            .all(|url| url == &format!("{}/2021/72534014819.csv", DATA_URL)));
    }

    #[tokio::test]
    async fn test_catalog_failure_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let transport = FakeTransport::new().with_reply(CATALOG_URL, StatusCode::NOT_FOUND, "");
        let sleeper = RecordingSleeper::default();
        let downloader = IsdDownloader::with_parts(config(dir.path()), &transport, &sleeper);

        let err = downloader.run().await.unwrap_err();

        assert!(matches!(
            err,
            IsdDownloaderError::Catalog(CatalogError::Unavailable { .. })
        ));
        assert_eq!(transport.calls(), vec![CATALOG_URL.to_string(); 3]);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_empty_catalog_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let transport =
            FakeTransport::new().with_reply(CATALOG_URL, StatusCode::OK, "USAF,WBAN,ICAO,BEGIN,END\n");
        let sleeper = RecordingSleeper::default();
        let downloader = IsdDownloader::with_parts(config(dir.path()), &transport, &sleeper);

        let err = downloader.run().await.unwrap_err();

        assert!(matches!(
            err,
            IsdDownloaderError::Catalog(CatalogError::Empty { .. })
        ));
        assert_eq!(transport.calls(), vec![CATALOG_URL.to_string()]);
    }

    #[test]
    fn test_resolve_all_keeps_configured_order() {
        let dir = tempfile::tempdir().unwrap();
        let transport = FakeTransport::new();
        let sleeper = RecordingSleeper::default();
        let config = DownloadConfig::builder()
            .airport_codes(vec!["KMDW".into(), "KDAL".into()])
            .output_dir(dir.path())
            .build()
            .unwrap();
        let downloader = IsdDownloader::with_parts(config, &transport, &sleeper);
        let rows = vec![
            CatalogRow {
                icao: "KDAL".into(),
                usaf: "13960".into(),
                wban: "13960".into(),
                name: "DALLAS LOVE FIELD".into(),
                begin: "19730101".into(),
                end: "".into(),
            },
            CatalogRow {
                icao: "KMDW".into(),
                usaf: "725340".into(),
                wban: "14819".into(),
                name: "CHICAGO MIDWAY".into(),
                begin: "19730101".into(),
                end: "".into(),
            },
        ];

        let (mapping, unresolved) = downloader.resolve_all(&rows);

        let ids: Vec<&str> = mapping.iter().map(|s| s.station_id.as_str()).collect();
        assert_eq!(ids, vec!["72534014819", "01396013960"]);
        assert!(unresolved.is_empty());
    }
}

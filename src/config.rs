//! Run configuration. Every tunable of a run lives in [`DownloadConfig`], which is
//! immutable once built and handed to the resolver and fetcher.

use crate::stations::select_station::normalize_code;
use crate::types::year_range::{InvalidYearRange, YearRange};
use crate::weather_data::retry::RetryPolicy;
use bon::bon;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_AIRPORT_CODES: [&str; 10] = [
    "KDAL", "KMDW", "KDEN", "KLAS", "KPHX", "KBWI", "KHOU", "KMCO", "KOAK", "KBNA",
];
pub const DEFAULT_FIRST_YEAR: i32 = 2019;
pub const DEFAULT_LAST_YEAR: i32 = 2024;
pub const DEFAULT_OUTPUT_DIR: &str = "downloads_ncei";
pub const DEFAULT_CATALOG_URL: &str = "https://www.ncei.noaa.gov/pub/data/noaa/isd-history.csv";
pub const DEFAULT_DATA_BASE_URL: &str = "https://www.ncei.noaa.gov/data/global-hourly/access";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_RETRIES: u32 = 3;
pub const DEFAULT_BACKOFF_BASE: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadConfig {
    airport_codes: Vec<String>,
    years: YearRange,
    output_dir: PathBuf,
    timeout: Duration,
    retries: u32,
    backoff_base: Duration,
    catalog_url: String,
    data_base_url: String,
}

#[bon]
impl DownloadConfig {
    /// Builds a configuration; anything not set falls back to the `DEFAULT_*` constants.
    /// `DownloadConfig::builder().build()` is the default configuration.
    ///
    /// Airport codes are trimmed and upper-cased; blanks and repeats are dropped while
    /// keeping the first-seen order.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidYearRange`] when `first_year` is after `last_year`.
    ///
    /// # Examples
    ///
    /// ```
    /// use isd_downloader::DownloadConfig;
    /// use std::time::Duration;
    ///
    /// let config = DownloadConfig::builder()
    ///     .airport_codes(vec!["kdal".to_string(), "KMDW".to_string()])
    ///     .first_year(2020)
    ///     .last_year(2021)
    ///     .backoff_base(Duration::from_millis(500))
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(config.airport_codes(), ["KDAL", "KMDW"]);
    /// assert_eq!(config.retries(), 3);
    /// ```
    #[builder]
    pub fn new(
        airport_codes: Option<Vec<String>>,
        first_year: Option<i32>,
        last_year: Option<i32>,
        #[builder(into)] output_dir: Option<PathBuf>,
        timeout: Option<Duration>,
        retries: Option<u32>,
        backoff_base: Option<Duration>,
        #[builder(into)] catalog_url: Option<String>,
        #[builder(into)] data_base_url: Option<String>,
    ) -> Result<Self, InvalidYearRange> {
        let codes = airport_codes.unwrap_or_else(|| {
            DEFAULT_AIRPORT_CODES.iter().map(|c| c.to_string()).collect()
        });
        let years = YearRange::new(
            first_year.unwrap_or(DEFAULT_FIRST_YEAR),
            last_year.unwrap_or(DEFAULT_LAST_YEAR),
        )?;

        Ok(Self {
            airport_codes: dedup_codes(codes),
            years,
            output_dir: output_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            timeout: timeout.unwrap_or(DEFAULT_TIMEOUT),
            retries: retries.unwrap_or(DEFAULT_RETRIES),
            backoff_base: backoff_base.unwrap_or(DEFAULT_BACKOFF_BASE),
            catalog_url: catalog_url.unwrap_or_else(|| DEFAULT_CATALOG_URL.to_string()),
            data_base_url: data_base_url.unwrap_or_else(|| DEFAULT_DATA_BASE_URL.to_string()),
        })
    }

    pub fn airport_codes(&self) -> &[String] {
        &self.airport_codes
    }

    pub fn years(&self) -> YearRange {
        self.years
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn retries(&self) -> u32 {
        self.retries
    }

    pub fn backoff_base(&self) -> Duration {
        self.backoff_base
    }

    pub fn catalog_url(&self) -> &str {
        &self.catalog_url
    }

    pub fn data_base_url(&self) -> &str {
        &self.data_base_url
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.retries, self.backoff_base)
    }
}

fn dedup_codes(codes: Vec<String>) -> Vec<String> {
    let mut seen = Vec::with_capacity(codes.len());
    for code in codes.iter().map(|c| normalize_code(c)) {
        if !code.is_empty() && !seen.contains(&code) {
            seen.push(code);
        }
    }
    seen
}

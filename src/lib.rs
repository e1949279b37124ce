mod config;
mod error;
mod isd_downloader;
mod stations;
#[cfg(test)]
mod test_util;
mod types;
mod utils;
mod weather_data;

pub use config::*;
pub use error::IsdDownloaderError;
pub use isd_downloader::*;

pub use stations::catalog::{load_catalog, parse_catalog};
pub use stations::error::CatalogError;
pub use stations::select_station::{candidates, normalize_code, select_station, zero_pad};

pub use types::catalog_date::{CatalogDate, ACTIVE_END_YEAR, UNKNOWN_BEGIN_YEAR};
pub use types::catalog_row::CatalogRow;
pub use types::resolved_station::{ResolvedStation, StationMapping};
pub use types::year_range::{InvalidYearRange, YearRange};

pub use utils::{observation_file_path, observation_url};

pub use weather_data::error::{AttemptError, DownloadError, FetchError};
pub use weather_data::fetcher::{DownloadOutcome, Fetcher};
pub use weather_data::retry::{RetryExhausted, RetryPolicy, Sleeper, TokioSleeper};
pub use weather_data::transport::{BoxError, HttpResponse, ReqwestTransport, Transport};

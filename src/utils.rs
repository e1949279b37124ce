use log::info;
use std::io;
use std::path::{Path, PathBuf};

/// Creates `path` (and parents) unless it already exists as a directory.
pub async fn ensure_output_dir_exists(path: &Path) -> io::Result<()> {
    match tokio::fs::metadata(path).await {
        Ok(metadata) => {
            if !metadata.is_dir() {
                return Err(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("Output path exists but is not a directory: {}", path.display()),
                ));
            }
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!("Creating output directory: {}", path.display());
            tokio::fs::create_dir_all(path).await
        }
        Err(e) => Err(e),
    }
}

/// `{output_dir}/{icao}_{year}.csv`
pub fn observation_file_path(output_dir: &Path, icao: &str, year: i32) -> PathBuf {
    output_dir.join(format!("{}_{}.csv", icao, year))
}

/// `{base}/{year}/{station_id}.csv`
pub fn observation_url(base_url: &str, year: i32, station_id: &str) -> String {
    format!("{}/{}/{}.csv", base_url.trim_end_matches('/'), year, station_id)
}

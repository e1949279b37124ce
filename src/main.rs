use env_logger::{Env, Target};
use isd_downloader::{DownloadConfig, IsdDownloader, IsdDownloaderError};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), IsdDownloaderError> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Stdout)
        .init();

    let downloader = IsdDownloader::new(DownloadConfig::builder().build()?)?;
    downloader.run().await?;
    Ok(())
}

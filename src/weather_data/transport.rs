use log::debug;
use reqwest::{Client, StatusCode};
use std::future::Future;
use std::time::Duration;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Status and fully received body of one HTTP GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// `true` if the body has something besides ASCII whitespace.
    pub fn has_content(&self) -> bool {
        !self.body.trim_ascii().is_empty()
    }
}

/// The HTTP seam used by [`crate::weather_data::fetcher::Fetcher`].
pub trait Transport {
    fn get(&self, url: &str) -> impl Future<Output = Result<HttpResponse, BoxError>>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &str) -> impl Future<Output = Result<HttpResponse, BoxError>> {
        (**self).get(url)
    }
}

/// [`Transport`] backed by a `reqwest` client with a per-request timeout.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, BoxError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        debug!("GET {} -> {} ({} bytes)", url, status, body.len());
        Ok(HttpResponse::new(status, body.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_body_has_no_content() {
        assert!(!HttpResponse::new(StatusCode::OK, b" \r\n\t ".to_vec()).has_content());
        assert!(!HttpResponse::new(StatusCode::OK, Vec::new()).has_content());
        assert!(HttpResponse::new(StatusCode::OK, b"\n\"DATE\"\n".to_vec()).has_content());
    }
}

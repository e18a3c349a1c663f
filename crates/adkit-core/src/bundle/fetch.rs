//! Full-body fetches from the content store.

use std::time::Duration;

/// Failure fetching a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// 404 from the store.
    NotFound,
    /// Any other non-2xx status.
    Status(u32),
    /// Transport failure (DNS, connect, TLS, timeout).
    Network(String),
}

/// Full-content fetches. The packager depends only on this trait.
pub trait Fetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// GET fetcher backed by libcurl. Follows redirects and runs blocking in
/// the calling thread. Only the connect phase is bounded; model files can
/// be large, so the transfer itself runs to completion.
#[derive(Debug, Default)]
pub struct HttpFetcher;

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let mut easy = curl::easy::Easy::new();
        easy.url(url).map_err(net)?;
        easy.follow_location(true).map_err(net)?;
        easy.connect_timeout(Duration::from_secs(15)).map_err(net)?;

        let mut body = Vec::new();
        {
            let mut transfer = easy.transfer();
            transfer
                .write_function(|data| {
                    body.extend_from_slice(data);
                    Ok(data.len())
                })
                .map_err(net)?;
            transfer.perform().map_err(net)?;
        }

        let code = easy.response_code().map_err(net)?;
        match code {
            200..=299 => Ok(body),
            404 => Err(FetchError::NotFound),
            other => Err(FetchError::Status(other)),
        }
    }
}

fn net(e: curl::Error) -> FetchError {
    FetchError::Network(e.to_string())
}

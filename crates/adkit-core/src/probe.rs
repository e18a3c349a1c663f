//! Remote file existence probing.
//!
//! HEAD requests via libcurl. A transport failure is an outcome here, not an
//! error: this layer cannot distinguish a missing file from a blocked or
//! unreachable store, so resolution treats both as absent and the detail
//! surfaces through diagnostics instead.

use std::time::Duration;

/// Classified outcome of a single HEAD probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// 2xx response.
    Ok(u32),
    /// 404 from the store.
    NotFound,
    /// Any other HTTP status.
    HttpError(u32),
    /// Transport failure (DNS, connect, TLS, timeout).
    Network(String),
}

impl ProbeOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, ProbeOutcome::Ok(_))
    }
}

/// Maps an HTTP status code onto a probe outcome.
pub fn classify_status(code: u32) -> ProbeOutcome {
    if (200..300).contains(&code) {
        ProbeOutcome::Ok(code)
    } else if code == 404 {
        ProbeOutcome::NotFound
    } else {
        ProbeOutcome::HttpError(code)
    }
}

/// Existence checks against the content store.
///
/// The resolution pipeline depends only on this trait; tests script it with
/// a fixed URL set.
pub trait Prober {
    /// Probes a URL and classifies the response.
    fn status(&self, url: &str) -> ProbeOutcome;

    /// True when the URL exists (2xx). Every other outcome counts as absent.
    fn exists(&self, url: &str) -> bool {
        self.status(url).is_ok()
    }
}

/// HEAD prober backed by libcurl. Follows redirects; runs blocking in the
/// calling thread.
#[derive(Debug, Default)]
pub struct HttpProber;

impl Prober for HttpProber {
    fn status(&self, url: &str) -> ProbeOutcome {
        let outcome = match head_status(url) {
            Ok(code) => classify_status(code),
            Err(e) => ProbeOutcome::Network(e.to_string()),
        };
        tracing::debug!(url = %url, outcome = ?outcome, "probe");
        outcome
    }
}

fn head_status(url: &str) -> Result<u32, curl::Error> {
    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    // HEAD request
    easy.nobody(true)?;
    easy.follow_location(true)?;
    easy.connect_timeout(Duration::from_secs(15))?;
    easy.timeout(Duration::from_secs(30))?;
    easy.perform()?;
    easy.response_code()
}

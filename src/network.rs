//! Raw network fetch.
//!
//! The pipeline only depends on the [`Fetcher`] trait. [`HttpFetcher`] is the
//! `reqwest` implementation; it does not retry, and neither does the pipeline.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{self, HeaderMap, HeaderValue};

use crate::encoding;
use crate::error::{Error, Result};

/// Blocking fetch of remote resources.
pub trait Fetcher: Send + Sync {
    /// Fetch a page and decode it to UTF-8.
    fn get_html(&self, url: &str, timeout: Duration) -> Result<String>;

    /// Fetch raw bytes (images), reading at most `limit` bytes.
    fn get_bytes(&self, url: &str, timeout: Duration, limit: usize) -> Result<Vec<u8>>;
}

/// `reqwest`-backed fetcher.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a client sending `user_agent`.
    pub fn new(user_agent: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
        );
        headers.insert(header::ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(user_agent)
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Fetch {
                url: String::new(),
                reason: format!("client setup: {e}"),
            })?;

        Ok(Self { client })
    }

    fn send(&self, url: &str, timeout: Duration) -> Result<reqwest::blocking::Response> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .map_err(|e| fetch_error(url, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Fetch {
                url: url.to_string(),
                reason: format!("status {status}"),
            });
        }
        Ok(response)
    }
}

fn fetch_error(url: &str, e: &reqwest::Error) -> Error {
    let kind = if e.is_timeout() {
        "timeout"
    } else if e.is_connect() {
        "connect"
    } else {
        "request"
    };
    Error::Fetch {
        url: url.to_string(),
        reason: format!("{kind}: {e}"),
    }
}

impl Fetcher for HttpFetcher {
    fn get_html(&self, url: &str, timeout: Duration) -> Result<String> {
        let response = self.send(url, timeout)?;
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().map_err(|e| fetch_error(url, &e))?;
        tracing::debug!(url, bytes = bytes.len(), "downloaded html");
        Ok(encoding::transcode_to_utf8(&bytes, content_type.as_deref()))
    }

    fn get_bytes(&self, url: &str, timeout: Duration, limit: usize) -> Result<Vec<u8>> {
        use std::io::Read;

        let response = self.send(url, timeout)?;
        let mut buf = Vec::new();
        response
            .take(limit as u64)
            .read_to_end(&mut buf)
            .map_err(|e| Error::Fetch {
                url: url.to_string(),
                reason: format!("body: {e}"),
            })?;
        Ok(buf)
    }
}

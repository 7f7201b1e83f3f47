//! HTTP client wrapper for streaming artifact downloads.
//!
//! The client knows nothing about caching: given a URL and a destination
//! path it streams the body to disk and reports a typed failure. Retry
//! policy, if any, belongs to the caller.

use std::path::Path;
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::{Client, ClientBuilder};
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, instrument};
use url::Url;

use super::error::FetchError;

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default HTTP read timeout (5 minutes for large artifacts).
pub const READ_TIMEOUT_SECS: u64 = 300;

/// User-Agent identifying the tool.
fn user_agent() -> String {
    format!("prebuild-fetch/{}", env!("CARGO_PKG_VERSION"))
}

/// HTTP client for streaming downloads.
///
/// Designed to be created once and reused, taking advantage of connection
/// pooling.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient {
    /// Creates a new HTTP client with default timeouts.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        Self::new_with_timeouts(CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS)
    }

    /// Creates a new HTTP client with explicit timeout values.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails with the supplied timeouts.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new_with_timeouts(connect_timeout_secs: u64, read_timeout_secs: u64) -> Self {
        let client = ClientBuilder::new()
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .read_timeout(Duration::from_secs(read_timeout_secs))
            .user_agent(user_agent())
            .build()
            .expect("failed to build HTTP client with static configuration");
        Self { client }
    }

    /// Streams the body of `url` into `dest`, returning bytes written.
    ///
    /// `dest` is created (or truncated) here; the caller owns its cleanup
    /// on failure, which is what the cache's temp-file guard does.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the URL is invalid, the request fails,
    /// the server responds with a non-success status, or writing fails.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn download_to_path(&self, url: &str, dest: &Path) -> Result<u64, FetchError> {
        Url::parse(url).map_err(|_| FetchError::invalid_url(url))?;

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::timeout(url)
            } else {
                FetchError::network(url, e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::http_status(url, status.as_u16()));
        }

        let file = File::create(dest)
            .await
            .map_err(|e| FetchError::io(dest.to_path_buf(), e))?;
        let mut writer = BufWriter::new(file);
        let mut stream = response.bytes_stream();
        let mut bytes_written: u64 = 0;

        while let Some(chunk_result) = stream.next().await {
            let chunk = chunk_result.map_err(|e| FetchError::network(url, e))?;
            writer
                .write_all(&chunk)
                .await
                .map_err(|e| FetchError::io(dest.to_path_buf(), e))?;
            bytes_written += chunk.len() as u64;
        }

        // Ensure all data reaches the file before the caller renames it.
        writer
            .flush()
            .await
            .map_err(|e| FetchError::io(dest.to_path_buf(), e))?;

        debug!(bytes = bytes_written, "stream complete");
        Ok(bytes_written)
    }
}

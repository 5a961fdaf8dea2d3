//! HTTP client for the remote CSV

use reqwest::Client;
use std::time::Duration;

use super::error::{SourceError, SourceResult};

/// Fetches the dataset CSV over HTTP
pub struct SourceClient {
    client: Client,
}

impl SourceClient {
    /// Create a client with the given request timeout
    pub fn new(timeout: Duration) -> SourceResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("covidash/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }

    /// Download the body at `url`
    ///
    /// Fails on transport errors and non-success statuses. No retry.
    pub async fn fetch(&self, url: &str) -> SourceResult<Vec<u8>> {
        tracing::debug!(url = %url, "Fetching dataset");

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        tracing::debug!(url = %url, bytes = bytes.len(), "Dataset downloaded");

        Ok(bytes.to_vec())
    }
}

// SPDX-License-Identifier: PMPL-1.0-or-later
//! HTTP page fetcher.
//!
//! Retrieval sits outside the analysis core: it hands back raw markup or a
//! fetch error, and nothing here knows about checkers.

use crate::config::FetchConfig;
use crate::error::{AccessCheckError, Result};
use reqwest::{Client, Url};
use std::time::Duration;
use tracing::info;

/// Page fetcher
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Create a fetcher with the configured timeout and User-Agent
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }

    /// Download the HTML of a page
    pub async fn fetch_html(&self, url: &str) -> Result<String> {
        let url = validate_url(url)?;
        info!("Fetching: {}", url);

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AccessCheckError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

/// Require an absolute http(s) URL
pub fn validate_url(url: &str) -> Result<Url> {
    let trimmed = url.trim();
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(AccessCheckError::InvalidUrl(format!(
            "{} (must start with http:// or https://)",
            trimmed
        )));
    }
    Url::parse(trimmed).map_err(|e| AccessCheckError::InvalidUrl(format!("{}: {}", trimmed, e)))
}

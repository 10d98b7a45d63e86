//! HTTP client for a Spring Initializr instance

use super::metadata::Metadata;
use super::options::ProjectOptions;
use crate::config::InitializrConfig;
use crate::error::InitializrError;
use anyhow::{Context, Result};
use reqwest::header::ACCEPT;
use tracing::debug;
use url::Url;

/// Archive endpoint, relative to the service URL
const STARTER_ARCHIVE: &str = "starter.zip";

/// Fetches metadata and generated projects from a Spring Initializr instance
pub struct InitializrClient {
    config: InitializrConfig,
    client: reqwest::Client,
}

impl InitializrClient {
    pub fn new(config: InitializrConfig) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { config, client }
    }

    /// Build a URL by appending a path segment, preserving query parameters
    fn build_url(base: &Url, path_segment: &str) -> Result<Url, InitializrError> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| InitializrError::CannotBeABase(base.clone()))?
            .pop_if_empty()
            .push(path_segment);
        Ok(url)
    }

    /// URL of the generated archive for `options`
    pub fn starter_url(&self, options: &ProjectOptions) -> Result<Url, InitializrError> {
        let mut url = Self::build_url(&self.config.url, STARTER_ARCHIVE)?;
        let pairs = options.query_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        Ok(url)
    }

    async fn get(&self, url: Url) -> Result<reqwest::Response> {
        debug!(%url, "GET");
        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT, &self.config.accept_header)
            .send()
            .await
            .with_context(|| format!("Failed to reach Spring Initializr at {}", url))?;

        let status = response.status();
        debug!(%url, %status, "response");
        if !status.is_success() {
            return Err(InitializrError::HttpStatus { url, status }.into());
        }

        Ok(response)
    }

    /// Fetch the metadata describing the project form
    pub async fn fetch_metadata(&self) -> Result<Metadata> {
        let response = self.get(self.config.url.clone()).await?;
        let content = response
            .text()
            .await
            .context("Failed to read metadata response")?;
        serde_json::from_str(&content).context("Failed to parse Spring Initializr metadata")
    }

    /// Download the generated project archive
    pub async fn download_starter(&self, options: &ProjectOptions) -> Result<Vec<u8>> {
        let url = self.starter_url(options)?;
        let response = self.get(url).await?;
        let bytes = response
            .bytes()
            .await
            .context("Failed to download project archive")?;
        debug!(size = bytes.len(), "downloaded project archive");
        Ok(bytes.to_vec())
    }
}

//! Spring Initializr connection settings

use crate::error::InitializrError;
use url::Url;

/// Public Spring Initializr instance
pub const DEFAULT_URL: &str = "https://start.spring.io";

/// Environment variable overriding [`DEFAULT_URL`]
pub const URL_ENV: &str = "SPROUT_INITIALIZR_URL";

/// Metadata format version requested from the service
pub const DEFAULT_ACCEPT_HEADER: &str = "application/vnd.initializr.v2.2+json";

/// User agent sent with every request
pub const DEFAULT_USER_AGENT: &str = concat!("sprout/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct InitializrConfig {
    pub url: Url,
    pub accept_header: String,
    pub user_agent: String,
}

impl InitializrConfig {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            accept_header: DEFAULT_ACCEPT_HEADER.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Resolve the service URL: explicit argument, then [`URL_ENV`], then [`DEFAULT_URL`]
    pub fn resolve(cli_url: Option<&str>) -> Result<Self, InitializrError> {
        Self::resolve_with(cli_url, std::env::var(URL_ENV).ok())
    }

    fn resolve_with(cli_url: Option<&str>, env_url: Option<String>) -> Result<Self, InitializrError> {
        let url_str = match (cli_url, env_url) {
            (Some(url), _) => url.to_string(),
            (None, Some(url)) if !url.trim().is_empty() => url,
            _ => DEFAULT_URL.to_string(),
        };
        Ok(Self::new(parse_url(&url_str)?))
    }
}

impl Default for InitializrConfig {
    fn default() -> Self {
        Self::new(Url::parse(DEFAULT_URL).expect("default URL is valid"))
    }
}

fn parse_url(url_str: &str) -> Result<Url, InitializrError> {
    let url = Url::parse(url_str.trim()).map_err(|source| InitializrError::InvalidUrl {
        url: url_str.to_string(),
        source,
    })?;
    if url.cannot_be_a_base() {
        return Err(InitializrError::CannotBeABase(url));
    }
    Ok(url)
}

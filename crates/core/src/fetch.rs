//! Article page retrieval.
//!
//! [`fetch_url`] performs the plain GET against the article host.
//! [`fetch_article`] is the best-effort path used during conversion: it only
//! touches the network for URLs on a known platform and turns every failure
//! into `None`.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::Client;
use reqwest::header::ACCEPT;
use tracing::debug;
use url::Url;

use crate::extract::extract;
use crate::platform::match_platform;
use crate::{ArticastError, Result};

/// Browser-like identification sent to article hosts.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

/// HTTP client configuration for fetching article pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout.
    pub timeout: Duration,
    /// User-Agent header value.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout: Duration::from_secs(30), user_agent: DEFAULT_USER_AGENT.to_string() }
    }
}

impl FetchConfig {
    /// Builds a reqwest client honoring this configuration.
    pub fn client(&self) -> Result<Client> {
        Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent.clone())
            .build()
            .map_err(ArticastError::HttpError)
    }
}

/// Fetches HTML content from a URL.
///
/// Follows redirects and treats any non-success status as an error.
pub async fn fetch_url(url: &str, config: &FetchConfig) -> Result<String> {
    let client = config.client()?;
    fetch_with_client(&client, url).await
}

/// Fetches HTML content from a URL with an existing client.
///
/// The User-Agent comes from the client, see [`FetchConfig::client`].
pub async fn fetch_with_client(client: &Client, url: &str) -> Result<String> {
    let parsed_url = Url::parse(url).map_err(|e| ArticastError::InvalidUrl(e.to_string()))?;

    let response = client
        .get(parsed_url)
        .header(ACCEPT, "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
        .send()
        .await?
        .error_for_status()?;

    let content = response.text().await?;

    Ok(content)
}

/// Fetches `url` and extracts its article text, if the platform is known.
///
/// Returns `None` without a network call when no platform matches. Network
/// and parse failures are logged and also yield `None`.
pub async fn fetch_article(client: &Client, url: &str) -> Option<String> {
    let Some(rule) = match_platform(url) else {
        debug!(url, "no platform rule matches, skipping extraction");
        return None;
    };

    debug!(url, platform = rule.name(), "fetching article page");

    match fetch_with_client(client, url).await {
        Ok(html) => extract(&html, rule.body_selector()),
        Err(e) => {
            debug!(url, error = %e, "article fetch failed, continuing without text");
            None
        }
    }
}

/// Reads HTML content from a local file.
pub fn fetch_file(path: &str) -> Result<String> {
    let path_buf = PathBuf::from(path);

    if !path_buf.exists() {
        Err(ArticastError::FileNotFound(path_buf))
    } else {
        fs::read_to_string(&path_buf).map_err(ArticastError::from)
    }
}

/// Reads HTML content from standard input until EOF.
pub fn fetch_stdin() -> Result<String> {
    use std::io::{self, Read};

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    Ok(buffer)
}

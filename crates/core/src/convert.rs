//! Article-to-podcast conversion.
//!
//! [`Converter`] ties the pieces together for one request: validate the URL,
//! extract the article text when the platform is known, hand text and URL to
//! the synthesis workflow, and relay the links it returns.
//!
//! # Example
//!
//! ```rust,no_run
//! use articast_core::{ConversionConfig, Converter, SynthesisConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> articast_core::Result<()> {
//! let config = ConversionConfig::builder()
//!     .synthesis(SynthesisConfig::builder().token("pat_example").workflow_id("42").build())
//!     .build();
//!
//! let converter = Converter::new(config)?;
//! let conversion = converter.convert("https://mp.weixin.qq.com/s/abc").await?;
//! println!("{}", conversion.assets.audio_url);
//! # Ok(())
//! # }
//! ```

use reqwest::Client;
use tracing::{debug, info};
use url::Url;

use crate::fetch::{FetchConfig, fetch_article};
use crate::platform::match_platform;
use crate::synthesis::{PodcastAssets, SynthesisClient, SynthesisConfig};
use crate::{ArticastError, Result};

/// Configuration for a [`Converter`].
#[derive(Debug, Clone, Default)]
pub struct ConversionConfig {
    /// Settings for fetching article pages.
    pub fetch: FetchConfig,
    /// Settings for the synthesis workflow.
    pub synthesis: SynthesisConfig,
}

impl ConversionConfig {
    /// Creates a new builder for ConversionConfig.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder::new()
    }
}

/// Builder for ConversionConfig.
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: ConversionConfig::default() }
    }

    /// Sets the page fetch configuration.
    pub fn fetch(mut self, value: FetchConfig) -> Self {
        self.config.fetch = value;
        self
    }

    /// Sets the synthesis configuration.
    pub fn synthesis(mut self, value: SynthesisConfig) -> Self {
        self.config.synthesis = value;
        self
    }

    /// Builds the config.
    pub fn build(self) -> ConversionConfig {
        self.config
    }
}

impl Default for ConversionConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of a successful conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    /// Name of the detected platform, if any.
    pub platform: Option<String>,
    /// Characters of article text sent to the workflow (0 when extraction failed).
    pub article_chars: usize,
    /// The generated podcast links.
    pub assets: PodcastAssets,
}

/// Converts article URLs into podcasts.
///
/// Holds no per-request state and can be shared across tasks behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Converter {
    page_client: Client,
    synthesis: SynthesisClient,
}

impl Converter {
    /// Creates a converter, building the HTTP clients up front.
    pub fn new(config: ConversionConfig) -> Result<Self> {
        let page_client = config.fetch.client()?;
        let synthesis = SynthesisClient::new(config.synthesis)?;
        Ok(Self { page_client, synthesis })
    }

    /// The synthesis client in use.
    pub fn synthesis(&self) -> &SynthesisClient {
        &self.synthesis
    }

    /// Runs one conversion.
    ///
    /// Input errors are returned before any network call. Extraction failures
    /// are not errors: the workflow then receives empty article text. The URL
    /// is forwarded as given, minus surrounding whitespace.
    pub async fn convert(&self, url: &str) -> Result<Conversion> {
        validate_url(url)?;
        let url = url.trim();

        let platform = match_platform(url).map(|rule| rule.name().to_string());
        let article_text = fetch_article(&self.page_client, url).await.unwrap_or_default();
        let article_chars = article_text.chars().count();

        info!(url, platform = ?platform, article_chars, "starting conversion");

        let assets = self.synthesis.synthesize(&article_text, url).await?;

        debug!(audio = %assets.audio_url, cover = %assets.cover_url, "conversion finished");

        Ok(Conversion { platform, article_chars, assets })
    }
}

/// Checks that `url` is present and is an absolute http(s) URL.
///
/// # Example
///
/// ```rust
/// use articast_core::{ArticastError, validate_url};
///
/// assert!(validate_url("https://mp.weixin.qq.com/s/abc").is_ok());
/// assert!(matches!(validate_url("  "), Err(ArticastError::MissingUrl)));
/// assert!(matches!(validate_url("mp.weixin.qq.com/s/abc"), Err(ArticastError::InvalidUrl(_))));
/// ```
pub fn validate_url(url: &str) -> Result<Url> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(ArticastError::MissingUrl);
    }

    let parsed = Url::parse(trimmed).map_err(|e| ArticastError::InvalidUrl(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(ArticastError::InvalidUrl(format!("unsupported scheme: {}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url_accepts_http_and_https() {
        assert!(validate_url("http://example.com/a").is_ok());
        assert!(validate_url(" https://mp.weixin.qq.com/s/abc ").is_ok());
    }

    #[test]
    fn test_validate_url_missing() {
        assert!(matches!(validate_url(""), Err(ArticastError::MissingUrl)));
        assert!(matches!(validate_url("   "), Err(ArticastError::MissingUrl)));
    }

    #[test]
    fn test_validate_url_malformed() {
        assert!(matches!(validate_url("not a url"), Err(ArticastError::InvalidUrl(_))));
        assert!(matches!(validate_url("ftp://example.com/file"), Err(ArticastError::InvalidUrl(_))));
    }

    #[test]
    fn test_config_builder() {
        let config = ConversionConfig::builder()
            .synthesis(SynthesisConfig::builder().workflow_id("wf").build())
            .build();

        assert_eq!(config.synthesis.workflow_id, "wf");
        assert_eq!(config.fetch.user_agent, "Mozilla/5.0");
    }

    #[tokio::test]
    async fn test_convert_rejects_missing_url_before_network() {
        let config = ConversionConfig::builder()
            .synthesis(SynthesisConfig::builder().api_url("http://127.0.0.1:9/unreachable").build())
            .build();
        let converter = Converter::new(config).unwrap();

        let err = converter.convert("").await.unwrap_err();
        assert!(matches!(err, ArticastError::MissingUrl));
    }
}

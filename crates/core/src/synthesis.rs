//! Client for the external podcast synthesis workflow.
//!
//! The service is a workflow runner: it takes the article text and URL as
//! workflow parameters and answers with an envelope whose `data` field is a
//! JSON document encoded as a string, holding the audio and cover links.
//!
//! ```text
//! POST {api_url}
//! Authorization: Bearer {token}
//! {"workflow_id": "...", "parameters": {"article_text": "...", "article_url": "..."}}
//!
//! 200 {"code": 0, "msg": "", "data": "{\"audio\":\"...\",\"cover_url\":\"...\"}"}
//! ```

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::{ArticastError, Result};

/// Default workflow endpoint.
pub const DEFAULT_API_URL: &str = "https://api.coze.cn/v1/workflow/run";

/// How long a synthesis run may take before the call is abandoned.
pub const SYNTHESIS_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Connection settings for the synthesis service.
#[derive(Debug, Clone)]
pub struct SynthesisConfig {
    /// Workflow run endpoint.
    pub api_url: String,
    /// Static bearer credential.
    pub token: String,
    /// Identifier of the article-to-podcast workflow.
    pub workflow_id: String,
    /// Wall-clock limit for one synthesis call.
    pub timeout: Duration,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: String::new(),
            workflow_id: String::new(),
            timeout: SYNTHESIS_TIMEOUT,
        }
    }
}

impl SynthesisConfig {
    /// Creates a new builder for SynthesisConfig.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::time::Duration;
    /// use articast_core::SynthesisConfig;
    ///
    /// let config = SynthesisConfig::builder()
    ///     .token("pat_example")
    ///     .workflow_id("7518398236290940962")
    ///     .timeout(Duration::from_secs(120))
    ///     .build();
    /// assert_eq!(config.timeout, Duration::from_secs(120));
    /// ```
    pub fn builder() -> SynthesisConfigBuilder {
        SynthesisConfigBuilder::new()
    }
}

/// Builder for SynthesisConfig.
pub struct SynthesisConfigBuilder {
    config: SynthesisConfig,
}

impl SynthesisConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: SynthesisConfig::default() }
    }

    /// Sets the workflow endpoint.
    pub fn api_url(mut self, value: impl Into<String>) -> Self {
        self.config.api_url = value.into();
        self
    }

    /// Sets the bearer credential.
    pub fn token(mut self, value: impl Into<String>) -> Self {
        self.config.token = value.into();
        self
    }

    /// Sets the workflow identifier.
    pub fn workflow_id(mut self, value: impl Into<String>) -> Self {
        self.config.workflow_id = value.into();
        self
    }

    /// Sets the synthesis timeout.
    pub fn timeout(mut self, value: Duration) -> Self {
        self.config.timeout = value;
        self
    }

    /// Builds the config.
    pub fn build(self) -> SynthesisConfig {
        self.config
    }
}

impl Default for SynthesisConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Links to the generated podcast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodcastAssets {
    /// Audio file URL.
    pub audio_url: String,
    /// Cover image URL.
    pub cover_url: String,
}

#[derive(Debug, Serialize)]
struct WorkflowRunRequest<'a> {
    workflow_id: &'a str,
    parameters: WorkflowParameters<'a>,
}

#[derive(Debug, Serialize)]
struct WorkflowParameters<'a> {
    article_text: &'a str,
    article_url: &'a str,
}

#[derive(Debug, Deserialize)]
struct WorkflowEnvelope {
    code: i64,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    data: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WorkflowOutput {
    #[serde(default)]
    audio: Option<String>,
    #[serde(default)]
    cover_url: Option<String>,
}

/// Sends articles to the synthesis workflow and validates what comes back.
#[derive(Debug, Clone)]
pub struct SynthesisClient {
    client: Client,
    config: SynthesisConfig,
}

impl SynthesisClient {
    /// Creates a client with its own connection pool.
    pub fn new(config: SynthesisConfig) -> Result<Self> {
        let client = Client::builder().build().map_err(ArticastError::HttpError)?;
        Ok(Self { client, config })
    }

    /// Runs the workflow for one article.
    ///
    /// `article_text` may be empty when extraction failed; the service then
    /// works from the URL alone. The call is abandoned once
    /// [`SynthesisConfig::timeout`] elapses.
    pub async fn synthesize(&self, article_text: &str, article_url: &str) -> Result<PodcastAssets> {
        let started = std::time::Instant::now();

        let outcome = tokio::time::timeout(self.config.timeout, self.run_workflow(article_text, article_url)).await;

        match outcome {
            Ok(result) => {
                if result.is_ok() {
                    info!(elapsed_ms = started.elapsed().as_millis() as u64, "synthesis complete");
                }
                result
            }
            Err(_) => {
                error!(timeout = ?self.config.timeout, "synthesis call timed out");
                Err(ArticastError::Timeout(self.config.timeout))
            }
        }
    }

    async fn run_workflow(&self, article_text: &str, article_url: &str) -> Result<PodcastAssets> {
        let body = WorkflowRunRequest {
            workflow_id: &self.config.workflow_id,
            parameters: WorkflowParameters { article_text, article_url },
        };

        debug!(
            api_url = %self.config.api_url,
            article_chars = article_text.chars().count(),
            "submitting synthesis workflow"
        );

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.token)
            .json(&body)
            .send()
            .await
            .map_err(|e| ArticastError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ArticastError::Transport(e.to_string()))?;

        if !status.is_success() {
            error!(status = status.as_u16(), body = %text, "synthesis service returned an error status");
            return Err(match status {
                StatusCode::UNAUTHORIZED => ArticastError::Unauthorized,
                _ => ArticastError::UpstreamStatus { status: status.as_u16() },
            });
        }

        parse_envelope(&text)
    }
}

/// Validates a workflow response body and pulls out the two links.
fn parse_envelope(body: &str) -> Result<PodcastAssets> {
    let envelope: WorkflowEnvelope = serde_json::from_str(body).map_err(|e| {
        error!(error = %e, body = %body, "synthesis envelope is not valid JSON");
        ArticastError::MalformedResponse(e.to_string())
    })?;

    if envelope.code != 0 {
        error!(code = envelope.code, msg = ?envelope.msg, "workflow reported failure");
        let msg = envelope
            .msg
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| "workflow execution failed".to_string());
        return Err(ArticastError::WorkflowFailed(msg));
    }

    let Some(data) = envelope.data else {
        error!("workflow envelope has no data field");
        return Err(ArticastError::IncompleteResult);
    };

    let output: WorkflowOutput = serde_json::from_str(&data).map_err(|e| {
        error!(error = %e, data = %data, "workflow data is not valid JSON");
        ArticastError::MalformedResponse(e.to_string())
    })?;

    match (non_empty(output.audio), non_empty(output.cover_url)) {
        (Some(audio_url), Some(cover_url)) => Ok(PodcastAssets { audio_url, cover_url }),
        (audio, cover) => {
            error!(has_audio = audio.is_some(), has_cover = cover.is_some(), "workflow result is incomplete");
            Err(ArticastError::IncompleteResult)
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = SynthesisConfig::default();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.timeout, Duration::from_secs(300));
        assert!(config.token.is_empty());
    }

    #[test]
    fn test_request_body_shape() {
        let body = WorkflowRunRequest {
            workflow_id: "wf",
            parameters: WorkflowParameters { article_text: "", article_url: "https://a.b/c" },
        };

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "workflow_id": "wf",
                "parameters": {"article_text": "", "article_url": "https://a.b/c"}
            })
        );
    }

    #[test]
    fn test_assets_serialize_camel_case() {
        let assets = PodcastAssets { audio_url: "http://x/a.mp3".into(), cover_url: "http://x/c.png".into() };
        let value = serde_json::to_value(&assets).unwrap();
        assert_eq!(value, serde_json::json!({"audioUrl": "http://x/a.mp3", "coverUrl": "http://x/c.png"}));
    }

    #[test]
    fn test_parse_envelope_success() {
        let body = r#"{"code":0,"data":"{\"audio\":\"http://x/a.mp3\",\"cover_url\":\"http://x/c.png\"}"}"#;
        let assets = parse_envelope(body).unwrap();
        assert_eq!(assets.audio_url, "http://x/a.mp3");
        assert_eq!(assets.cover_url, "http://x/c.png");
    }

    #[test]
    fn test_parse_envelope_workflow_error_uses_msg() {
        let body = r#"{"code":4000,"msg":"workflow quota exceeded"}"#;
        let err = parse_envelope(body).unwrap_err();
        assert!(matches!(err, ArticastError::WorkflowFailed(ref m) if m == "workflow quota exceeded"));
    }

    #[test]
    fn test_parse_envelope_workflow_error_default_msg() {
        let err = parse_envelope(r#"{"code":1,"msg":""}"#).unwrap_err();
        assert!(matches!(err, ArticastError::WorkflowFailed(ref m) if m == "workflow execution failed"));
    }

    #[test]
    fn test_parse_envelope_not_json() {
        let err = parse_envelope("<html>bad gateway</html>").unwrap_err();
        assert!(matches!(err, ArticastError::MalformedResponse(_)));
    }

    #[test]
    fn test_parse_envelope_data_not_json() {
        let err = parse_envelope(r#"{"code":0,"data":"not json"}"#).unwrap_err();
        assert!(matches!(err, ArticastError::MalformedResponse(_)));
    }

    #[test]
    fn test_parse_envelope_missing_cover() {
        let body = r#"{"code":0,"data":"{\"audio\":\"http://x/a.mp3\"}"}"#;
        assert!(matches!(parse_envelope(body), Err(ArticastError::IncompleteResult)));
    }

    #[test]
    fn test_parse_envelope_empty_audio() {
        let body = r#"{"code":0,"data":"{\"audio\":\"\",\"cover_url\":\"http://x/c.png\"}"}"#;
        assert!(matches!(parse_envelope(body), Err(ArticastError::IncompleteResult)));
    }

    #[test]
    fn test_parse_envelope_missing_data() {
        assert!(matches!(parse_envelope(r#"{"code":0}"#), Err(ArticastError::IncompleteResult)));
    }
}

//! Command-line and environment configuration for the server.

use std::net::SocketAddr;
use std::time::Duration;

use articast_core::{ConversionConfig, DEFAULT_API_URL, DEFAULT_USER_AGENT, FetchConfig, SynthesisConfig};
use clap::Parser;

/// Article-to-podcast conversion service
#[derive(Parser, Debug, Clone)]
#[command(name = "articast-server")]
#[command(version)]
#[command(about = "HTTP service that turns article links into podcasts", long_about = None)]
pub struct Args {
    /// Address to listen on
    #[arg(long, default_value = "0.0.0.0:3000", env = "ARTICAST_BIND")]
    pub bind: SocketAddr,

    /// Synthesis workflow endpoint
    #[arg(long, default_value = DEFAULT_API_URL, env = "ARTICAST_API_URL")]
    pub api_url: String,

    /// Bearer token for the synthesis service
    #[arg(long, env = "ARTICAST_API_TOKEN", hide_env_values = true)]
    pub api_token: String,

    /// Workflow that performs the article-to-podcast synthesis
    #[arg(long, env = "ARTICAST_WORKFLOW_ID")]
    pub workflow_id: String,

    /// Synthesis timeout in seconds
    #[arg(long, default_value = "300", value_name = "SECS", env = "ARTICAST_TIMEOUT_SECS")]
    pub timeout_secs: u64,

    /// Article page fetch timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS", env = "ARTICAST_FETCH_TIMEOUT_SECS")]
    pub fetch_timeout_secs: u64,
}

impl Args {
    /// Builds the converter configuration from the parsed arguments.
    pub fn conversion_config(&self) -> ConversionConfig {
        ConversionConfig::builder()
            .fetch(FetchConfig {
                timeout: Duration::from_secs(self.fetch_timeout_secs),
                user_agent: DEFAULT_USER_AGENT.to_string(),
            })
            .synthesis(
                SynthesisConfig::builder()
                    .api_url(&self.api_url)
                    .token(&self.api_token)
                    .workflow_id(&self.workflow_id)
                    .timeout(Duration::from_secs(self.timeout_secs))
                    .build(),
            )
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["articast-server", "--api-token", "t", "--workflow-id", "wf"]).unwrap();

        assert_eq!(args.bind, "0.0.0.0:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(args.api_url, DEFAULT_API_URL);

        let config = args.conversion_config();
        assert_eq!(config.synthesis.timeout, Duration::from_secs(300));
        assert_eq!(config.synthesis.token, "t");
        assert_eq!(config.fetch.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_token_required() {
        let command = Args::command().mut_arg("api_token", |arg| arg.env(None::<&'static str>));
        let err = command.try_get_matches_from(["articast-server", "--workflow-id", "wf"]).unwrap_err();

        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
        assert!(err.to_string().contains("--api-token"));
    }

    #[test]
    fn test_timeout_override() {
        let args = Args::try_parse_from([
            "articast-server",
            "--api-token",
            "t",
            "--workflow-id",
            "wf",
            "--timeout-secs",
            "60",
        ])
        .unwrap();

        assert_eq!(args.conversion_config().synthesis.timeout, Duration::from_secs(60));
    }
}

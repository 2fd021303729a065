//! Error types for Articast operations.
//!
//! [`ArticastError`] covers every failure the conversion pipeline can report:
//! input validation, page retrieval, and the synthesis service round trip.
//! Extraction itself never fails loudly; it degrades to "no text" instead.
//!
//! # Example
//!
//! ```rust
//! use articast_core::{ArticastError, Result};
//!
//! fn require_url(url: &str) -> Result<&str> {
//!     if url.trim().is_empty() {
//!         return Err(ArticastError::MissingUrl);
//!     }
//!     Ok(url)
//! }
//! # assert!(require_url("").is_err());
//! ```

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Main error type for article conversion.
///
/// Variants are grouped the way callers need to react to them:
/// input errors are the caller's fault and are rejected before any network
/// call, upstream errors come from the synthesis service, and
/// [`ArticastError::Timeout`] is kept apart so it can be reported distinctly.
#[derive(Error, Debug)]
pub enum ArticastError {
    /// No URL was supplied, or it was blank.
    #[error("Missing required parameter: url")]
    MissingUrl,

    /// The URL could not be parsed or uses an unsupported scheme.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A platform rule's URL pattern is not a valid regular expression.
    #[error("Invalid platform pattern: {0}")]
    InvalidPattern(String),

    /// HTML could not be parsed or a CSS selector was invalid.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// HTTP request errors from reqwest while fetching an article page.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Reading a local file or stdin failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The synthesis service did not answer within the allotted time.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// The synthesis service rejected the bearer credential (HTTP 401).
    #[error("Synthesis service rejected the API token")]
    Unauthorized,

    /// The synthesis service answered with a non-success HTTP status.
    #[error("Synthesis service returned HTTP {status}")]
    UpstreamStatus { status: u16 },

    /// The workflow ran but reported a non-zero status code.
    #[error("Workflow failed: {0}")]
    WorkflowFailed(String),

    /// The response envelope or its `data` payload was not valid JSON.
    #[error("Malformed synthesis response: {0}")]
    MalformedResponse(String),

    /// The payload parsed but lacks the audio or cover link.
    #[error("Synthesis result is missing the audio or cover link")]
    IncompleteResult,

    /// The synthesis call failed at the network level.
    #[error("Synthesis request failed: {0}")]
    Transport(String),
}

impl ArticastError {
    /// Returns true for errors caused by the caller's input.
    ///
    /// These are raised before any outbound request is made.
    pub fn is_input_error(&self) -> bool {
        matches!(self, ArticastError::MissingUrl | ArticastError::InvalidUrl(_))
    }

    /// Returns true when the synthesis payload had the wrong shape.
    pub fn is_incomplete_result(&self) -> bool {
        matches!(
            self,
            ArticastError::MalformedResponse(_) | ArticastError::IncompleteResult
        )
    }
}

/// Result type alias for ArticastError.
pub type Result<T> = std::result::Result<T, ArticastError>;

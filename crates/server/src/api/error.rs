//! Error responses for the HTTP API.
//!
//! Every failure is reported as `{"error": "<message>"}`. Upstream details
//! stay in the logs; clients only see the user-facing message.

use articast_core::ArticastError;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{error, warn};

pub const MISSING_URL: &str = "Please provide an article URL";
pub const INVALID_URL: &str = "Please provide a valid URL";
pub const INVALID_BODY: &str = "Invalid request body";
pub const TIMED_OUT: &str =
    "Request timed out, please try again later. Converting an article usually takes 3-5 minutes.";
pub const AUTH_FAILED: &str = "Synthesis service authentication failed, check the token configuration";
pub const INCOMPLETE_RESULT: &str = "Synthesis returned an incomplete result, missing audio or cover";
pub const NETWORK_FAILED: &str = "Network request failed, please check the connection";
pub const INTERNAL: &str = "Internal server error";

/// An error ready to be sent to the client.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl From<ArticastError> for ApiError {
    fn from(err: ArticastError) -> Self {
        if err.is_input_error() {
            warn!(error = %err, "rejected conversion request");
        } else {
            error!(error = %err, "conversion failed");
        }

        match err {
            ArticastError::MissingUrl => Self::bad_request(MISSING_URL),
            ArticastError::InvalidUrl(_) => Self::bad_request(INVALID_URL),
            ArticastError::Timeout(_) => Self::new(StatusCode::REQUEST_TIMEOUT, TIMED_OUT),
            ArticastError::Unauthorized => Self::new(StatusCode::INTERNAL_SERVER_ERROR, AUTH_FAILED),
            ArticastError::UpstreamStatus { status } => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Synthesis request failed: {}", status),
            ),
            ArticastError::WorkflowFailed(msg) => Self::new(StatusCode::INTERNAL_SERVER_ERROR, msg),
            ArticastError::MalformedResponse(_) | ArticastError::IncompleteResult => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, INCOMPLETE_RESULT)
            }
            ArticastError::Transport(_) | ArticastError::HttpError(_) => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, NETWORK_FAILED)
            }
            _ => Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(error = %rejection.body_text(), "rejected request body");
        Self::bad_request(INVALID_BODY)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.message,
        }));

        (self.status, body).into_response()
    }
}

//! Supported platform listing and URL detection.

use articast_core::{match_platform, supported_platforms};
use axum::{Json, extract::Query};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct PlatformInfo {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct DetectQuery {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct DetectResponse {
    pub url: String,
    pub platform: Option<String>,
}

/// GET /api/platforms
pub async fn list_platforms() -> Json<Vec<PlatformInfo>> {
    let platforms = supported_platforms()
        .iter()
        .map(|rule| PlatformInfo { name: rule.name().to_string() })
        .collect();

    Json(platforms)
}

/// GET /api/detect?url=...
///
/// Reports which platform a URL belongs to, without fetching it.
pub async fn detect_platform(Query(query): Query<DetectQuery>) -> Json<DetectResponse> {
    let platform = match_platform(&query.url).map(|rule| rule.name().to_string());

    Json(DetectResponse { url: query.url, platform })
}

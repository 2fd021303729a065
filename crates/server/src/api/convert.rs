//! POST /api/convert

use articast_core::PodcastAssets;
use axum::{Json, extract::State, extract::rejection::JsonRejection};
use serde::Deserialize;
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

use super::AppState;
use super::error::ApiError;

/// Request body for a conversion.
#[derive(Debug, Deserialize)]
pub struct ConvertRequest {
    #[serde(default)]
    pub url: Option<String>,
}

/// Converts the article at `url` into a podcast.
///
/// # Response
/// - `200 {"audioUrl", "coverUrl"}` on success
/// - `400` missing or malformed URL, or an unreadable body
/// - `408` the synthesis service did not finish in time
/// - `500` upstream failure or incomplete result
pub async fn convert_handler(
    State(state): State<AppState>,
    payload: Result<Json<ConvertRequest>, JsonRejection>,
) -> Result<Json<PodcastAssets>, ApiError> {
    let Json(request) = payload?;
    let url = request.url.unwrap_or_default();

    let span = info_span!("convert", request_id = %Uuid::new_v4());

    async move {
        let conversion = state.converter.convert(&url).await?;

        info!(
            platform = conversion.platform.as_deref().unwrap_or("unknown"),
            article_chars = conversion.article_chars,
            "conversion succeeded"
        );

        Ok::<_, ApiError>(Json(conversion.assets))
    }
    .instrument(span)
    .await
}

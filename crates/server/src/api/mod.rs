//! HTTP routes.

pub mod convert;
pub mod error;
pub mod platforms;

use std::sync::Arc;

use articast_core::Converter;
use axum::{
    Json, Router,
    routing::{get, post},
};
use serde_json::{Value, json};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use convert::{ConvertRequest, convert_handler};
pub use error::ApiError;
pub use platforms::{detect_platform, list_platforms};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub converter: Arc<Converter>,
}

impl AppState {
    pub fn new(converter: Converter) -> Self {
        Self { converter: Arc::new(converter) }
    }
}

/// Builds the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/convert", post(convert_handler))
        .route("/api/platforms", get(list_platforms))
        .route("/api/detect", get(detect_platform))
        .route("/health", get(health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

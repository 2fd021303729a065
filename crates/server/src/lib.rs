pub mod api;
pub mod config;

pub use api::{AppState, create_router};
pub use config::Args;

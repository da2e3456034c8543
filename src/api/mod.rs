use std::sync::Arc;

use axum::routing::post;
use axum::Router;

use crate::openai::OpenAiClient;

pub mod handlers;
pub mod types;

use handlers::{generate_caption, generate_description};

/// Shared per-process dependencies, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub openai: Arc<OpenAiClient>,
}

/// Public API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/description/", post(generate_description))
        .route("/api/caption/", post(generate_caption))
}

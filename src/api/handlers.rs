use axum::extract::State;
use axum::Json;
use tracing::debug;

use crate::api::types::{CaptionRequest, ImageDescriptionRequest};
use crate::api::AppState;
use crate::error::OpenAiError;
use crate::prompts::build_caption_prompt;

/// POST /api/description/
///
/// Body is the trimmed free-text answer of the vision model.
pub async fn generate_description(
    State(state): State<AppState>,
    Json(payload): Json<ImageDescriptionRequest>,
) -> Result<String, OpenAiError> {
    let description = state.openai.describe_image(&payload.image).await?;
    Ok(description)
}

/// POST /api/caption/
///
/// Body is the model's raw JSON text, expected (but not checked) to hold
/// `{"captions": [five strings]}`.
pub async fn generate_caption(
    State(state): State<AppState>,
    Json(payload): Json<CaptionRequest>,
) -> Result<String, OpenAiError> {
    let prompt = build_caption_prompt(&payload);
    let captions = state.openai.caption_variants(&prompt).await?;
    debug!("caption variants: {captions}");
    Ok(captions)
}

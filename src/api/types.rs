use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ImageDescriptionRequest {
    /// Image reference the vision model can resolve: a URL or a data URI.
    pub image: String,
}

/// Caption parameters. `emojis` and `hashtags` are free-text instructions
/// ("yes"/"no"-style), not booleans; they land in the prompt verbatim.
#[derive(Debug, Deserialize)]
pub struct CaptionRequest {
    pub description: String,
    pub tone: String,
    pub style: String,
    #[serde(default)]
    pub context: Option<String>,
    pub emojis: String,
    pub hashtags: String,
}

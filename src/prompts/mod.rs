use minijinja::Environment;
use serde::Serialize;
use std::sync::OnceLock;

use crate::api::types::CaptionRequest;

/// Fixed instruction sent alongside the image reference.
pub const DESCRIBE_PROMPT: &str = "What's in this image?";

/// Captioning persona attached as the system message of every caption call.
pub const CAPTION_SYSTEM_PROMPT: &str = "As an AI caption creator, your task is to generate 5 distinct variations of captions for images based on the parameters provided. For each image, you must consider the description, tone, writing style, and any additional context. Pay attention to whether emojis and hashtags should be included, and weave them into the captions naturally if specified. Each caption should reflect the mood and style clearly, ensuring creativity and relevance to the given context. Maintain variety across the five captions, making each unique while staying aligned with the overall brief.";

const CAPTION_TEMPLATE_NAME: &str = "caption_prompt";

// Request fields are interpolated verbatim; the caller is trusted.
const CAPTION_TEMPLATE: &str = r#"Generate 5 variations of an engaging caption for the following image in JSON format. The caption should be influenced by the image description and the context provided. Tailor the tone, writing style, and any additional elements, such as emojis or hashtags, based on the specified instructions. Each variation should be unique but relevant to the image and the specified parameters.
Parameters:
Image Description: {{ description }}
Tone: {{ tone }}
Writing Style: {{ style }}
Additional Context: {{ context }}
Include Emojis: {{ emojis }}
Include Hashtags: {{ hashtags }}

Output Format:
{
    "captions": [
        "caption-1",
        "caption-2",
        "caption-3",
        "caption-4",
        "caption-5"
    ]
}"#;

static TEMPLATE_STATE: OnceLock<TemplateState> = OnceLock::new();

struct TemplateState {
    env: Environment<'static>,
}

impl TemplateState {
    fn render(&self, ctx: &impl Serialize) -> Result<String, minijinja::Error> {
        self.env.get_template(CAPTION_TEMPLATE_NAME)?.render(ctx)
    }
}

#[derive(Serialize)]
struct CaptionContext<'a> {
    description: &'a str,
    tone: &'a str,
    style: &'a str,
    context: &'a str,
    emojis: &'a str,
    hashtags: &'a str,
}

/// Render the caption prompt for one request. An omitted `context` renders
/// as an empty placeholder rather than failing.
pub fn build_caption_prompt(request: &CaptionRequest) -> String {
    let state = TEMPLATE_STATE.get_or_init(load_template_state);
    let ctx = CaptionContext {
        description: &request.description,
        tone: &request.tone,
        style: &request.style,
        context: request.context.as_deref().unwrap_or_default(),
        emojis: &request.emojis,
        hashtags: &request.hashtags,
    };
    state
        .render(&ctx)
        .unwrap_or_else(|err| panic!("caption template rendering failed: {err}"))
}

fn load_template_state() -> TemplateState {
    let mut env = Environment::new();
    env.add_template(CAPTION_TEMPLATE_NAME, CAPTION_TEMPLATE)
        .unwrap_or_else(|err| panic!("failed to compile caption template: {err}"));
    TemplateState { env }
}

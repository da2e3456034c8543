use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::OpenAiError;
use crate::prompts;

/// Thin client for an OpenAI-compatible Chat Completions endpoint.
///
/// Holds the credential and model names for the process lifetime; every call
/// is a single POST with no retry and no service-side timeout beyond the
/// HTTP client's default.
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    api_base: String,
    vision_model: String,
    caption_model: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: MessageContent,
}

#[derive(Serialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl OpenAiClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: config.api_key.clone(),
            api_base: config.api_base.clone(),
            vision_model: config.vision_model.clone(),
            caption_model: config.caption_model.clone(),
        }
    }

    /// Ask the vision model what the image shows. The reference is passed
    /// through verbatim as an `image_url` content part.
    pub async fn describe_image(&self, image: &str) -> Result<String, OpenAiError> {
        self.chat(self.describe_request(image)).await
    }

    /// Ask the text model for caption variants, forcing a JSON-object reply.
    /// The returned text is not parsed here.
    pub async fn caption_variants(&self, prompt: &str) -> Result<String, OpenAiError> {
        self.chat(self.caption_request(prompt)).await
    }

    fn describe_request(&self, image: &str) -> ChatRequest {
        ChatRequest {
            model: self.vision_model.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content: MessageContent::Parts(vec![
                    ContentPart::Text {
                        text: prompts::DESCRIBE_PROMPT.to_string(),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: image.to_string(),
                        },
                    },
                ]),
            }],
            response_format: None,
        }
    }

    fn caption_request(&self, prompt: &str) -> ChatRequest {
        ChatRequest {
            model: self.caption_model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: MessageContent::Text(prompts::CAPTION_SYSTEM_PROMPT.to_string()),
                },
                ChatMessage {
                    role: "user",
                    content: MessageContent::Text(prompt.to_string()),
                },
            ],
            response_format: Some(ResponseFormat {
                kind: "json_object",
            }),
        }
    }

    async fn chat(&self, request: ChatRequest) -> Result<String, OpenAiError> {
        let response = self
            .http
            .post(format!("{}/chat/completions", self.api_base))
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(classify_status(status, message));
        }

        let decoded: ChatResponse = response.json().await.map_err(|err| {
            OpenAiError::MalformedResponse(format!("undecodable completion body: {err}"))
        })?;

        let content = decoded
            .choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
            .ok_or_else(|| {
                OpenAiError::MalformedResponse("completion carried no choices".into())
            })?;

        Ok(content.trim().to_string())
    }
}

fn classify_status(status: StatusCode, message: String) -> OpenAiError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => OpenAiError::Auth(message),
        StatusCode::TOO_MANY_REQUESTS => OpenAiError::RateLimited(message),
        _ => OpenAiError::Api {
            status: status.as_u16(),
            message,
        },
    }
}

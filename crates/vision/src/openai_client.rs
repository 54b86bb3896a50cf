use async_trait::async_trait;
use common::OpenAiSettings;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::VisionError;
use crate::prompt::{SYSTEM_PROMPT, USER_PROMPT, image_data_url};
use crate::traits::VisionModel;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: MessageContent<'a>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum MessageContent<'a> {
    Text(&'a str),
    Parts(Vec<ContentPart<'a>>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Chat-completions client for OpenAI-compatible vision models.
#[derive(Clone)]
pub struct OpenAiVisionClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl OpenAiVisionClient {
    pub fn new(settings: &OpenAiSettings) -> Result<Self, VisionError> {
        let client = Client::builder().timeout(settings.timeout).build()?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            max_tokens: settings.max_tokens,
            temperature: settings.temperature,
        })
    }

    fn build_request<'a>(&'a self, image_base64: &str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: MessageContent::Text(SYSTEM_PROMPT),
                },
                ChatMessage {
                    role: "user",
                    content: MessageContent::Parts(vec![
                        ContentPart::Text { text: USER_PROMPT },
                        ContentPart::ImageUrl {
                            image_url: ImageUrl {
                                url: image_data_url(image_base64),
                            },
                        },
                    ]),
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}

#[async_trait]
impl VisionModel for OpenAiVisionClient {
    async fn describe_chart(&self, image_base64: &str) -> Result<String, VisionError> {
        let url = format!("{}/chat/completions", self.base_url);
        let request = self.build_request(image_base64);

        debug!(
            "Sending chart ({} base64 chars) to {} at {}",
            image_base64.len(),
            self.model,
            url
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            error!("Vision model request failed ({}): {}", status, body);
            return Err(VisionError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let chat = response.json::<ChatResponse>().await?;
        chat.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| VisionError::InvalidResponse("reply has no message content".into()))
    }
}

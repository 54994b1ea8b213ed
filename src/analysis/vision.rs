//! Vision model client and the retrying analyzer on top of it.
//!
//! [`OpenAiVision`] performs exactly one chat-completion call. [`VisionAnalyzer`]
//! wraps any [`VisionModel`] with the fixed-delay [`RetryPolicy`] and turns
//! exhaustion into `None`.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use url::Url;

use super::prompt;
use crate::core::config::AnalysisConfig;
use crate::core::retry::{retry, RetryError, RetryPolicy};

/// Errors from a single vision call. All of them are retried the same way.
#[derive(Error, Debug)]
pub enum VisionError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("response has no choices")]
    NoChoices,

    #[error("first choice has empty content")]
    EmptyContent,
}

/// One photo to evaluate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisionRequest {
    pub image_url: String,
    pub caption: Option<String>,
}

impl VisionRequest {
    pub fn new(image_url: impl Into<String>, caption: Option<&str>) -> Self {
        Self {
            image_url: image_url.into(),
            caption: caption.map(str::to_string),
        }
    }

    /// Text part of the user turn
    pub fn user_text(&self) -> String {
        prompt::user_text(self.caption.as_deref())
    }
}

/// Single-attempt multimodal completion.
#[async_trait]
pub trait VisionModel: Send + Sync {
    /// Returns the trimmed text of the first completion choice.
    async fn complete(&self, request: &VisionRequest) -> Result<String, VisionError>;
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
enum ChatMessage<'a> {
    System { content: &'a str },
    User { content: Vec<ContentPart<'a>> },
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: ImageUrl<'a> },
}

#[derive(Serialize)]
struct ImageUrl<'a> {
    url: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
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

/// OpenAI-compatible `/chat/completions` client.
pub struct OpenAiVision {
    client: Client,
    endpoint: String,
    api_key: SecretString,
    model: String,
    max_tokens: u32,
}

impl OpenAiVision {
    pub fn new(client: Client, base_url: &Url, api_key: SecretString, model: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            client,
            endpoint: format!("{}/chat/completions", base_url.as_str().trim_end_matches('/')),
            api_key,
            model: model.into(),
            max_tokens,
        }
    }

    pub fn from_config(client: Client, config: &AnalysisConfig) -> Self {
        Self::new(
            client,
            &config.openai_base_url,
            config.openai_api_key.clone(),
            config.openai_model.clone(),
            config.max_tokens,
        )
    }

    /// Full URL the requests go to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl VisionModel for OpenAiVision {
    async fn complete(&self, request: &VisionRequest) -> Result<String, VisionError> {
        log::info!("Sending image URL to OpenAI Vision API: {}", request.image_url);

        let text = request.user_text();
        if let Some(caption) = request.caption.as_deref().filter(|c| !c.trim().is_empty()) {
            log::info!("Including user caption: {}", caption);
        }

        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage::System {
                    content: prompt::SYSTEM_PROMPT,
                },
                ChatMessage::User {
                    content: vec![
                        ContentPart::Text { text: &text },
                        ContentPart::ImageUrl {
                            image_url: ImageUrl {
                                url: &request.image_url,
                            },
                        },
                    ],
                },
            ],
            max_tokens: self.max_tokens,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let raw = response.text().await?;

        if !status.is_success() {
            return Err(VisionError::Status {
                status: status.as_u16(),
                body: raw,
            });
        }

        log::info!("OpenAI Vision response: {}", raw);
        first_choice_text(&raw)
    }
}

fn first_choice_text(raw: &str) -> Result<String, VisionError> {
    let parsed: ChatResponse = serde_json::from_str(raw)?;
    let choice = parsed.choices.into_iter().next().ok_or(VisionError::NoChoices)?;
    let text = choice.message.content.unwrap_or_default().trim().to_string();

    if text.is_empty() {
        return Err(VisionError::EmptyContent);
    }
    Ok(text)
}

/// Vision model with bounded, fixed-delay retry.
#[derive(Clone)]
pub struct VisionAnalyzer {
    model: Arc<dyn VisionModel>,
    retry: RetryPolicy,
}

impl VisionAnalyzer {
    pub fn new(model: Arc<dyn VisionModel>, retry: RetryPolicy) -> Self {
        Self { model, retry }
    }

    /// Returns the verdict, or `None` once every attempt has failed.
    pub async fn analyze(&self, image_url: &str, caption: Option<&str>) -> Option<String> {
        let request = VisionRequest::new(image_url, caption);
        let model = &self.model;
        let request = &request;

        let outcome = retry(&self.retry, "OpenAI Vision analysis", |_attempt| async move {
            model.complete(request).await
        })
        .await;

        match outcome.result {
            Ok(verdict) => {
                if outcome.attempts > 1 {
                    log::info!("OpenAI Vision succeeded after {} attempt(s)", outcome.attempts);
                }
                Some(verdict)
            }
            Err(RetryError::MaxRetriesExhausted { attempts, last_error }) => {
                log::error!("OpenAI Vision gave up after {} attempt(s), last error: {}", attempts, last_error);
                None
            }
        }
    }
}

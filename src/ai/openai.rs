//! OpenAI-compatible chat completions backend.

use std::future::Future;
use std::pin::Pin;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{
    build_http_client, check_error_response, ChatMessage, CompletionBackend, CompletionRequest,
};

/// Default API root.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Temperature used for models that accept one.
const TEMPERATURE: f32 = 0.1;

/// OpenAI API request body.
#[derive(Serialize, Debug)]
struct OpenAiRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_completion_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    stream: bool,
}

/// OpenAI API response choice.
#[derive(Deserialize, Debug)]
struct Choice {
    message: ResponseMessage,
    #[allow(dead_code)]
    finish_reason: Option<String>,
}

/// OpenAI API response message.
#[derive(Deserialize, Debug)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// OpenAI API response.
#[derive(Deserialize, Debug)]
struct OpenAiResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    model: Option<String>,
    usage: Option<Usage>,
}

/// OpenAI API usage statistics.
#[derive(Deserialize, Debug)]
#[allow(dead_code)]
struct Usage {
    prompt_tokens: Option<u32>,
    completion_tokens: Option<u32>,
    total_tokens: Option<u32>,
}

/// Chat completions client for OpenAI and compatible servers.
pub struct OpenAiBackend {
    /// HTTP client for API requests.
    client: Client,
    /// API root (e.g., "https://api.openai.com" or "http://localhost:11434").
    base_url: String,
}

impl OpenAiBackend {
    /// Creates a backend for `base_url` with the standard request timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Ok(Self::with_client(build_http_client()?, base_url))
    }

    /// Creates a backend for `base_url` using an existing HTTP client.
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Builds the full chat completions URL.
    fn api_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url.trim_end_matches('/'))
    }

    /// Returns true for models that take `max_completion_tokens` and a fixed temperature.
    fn is_reasoning_model(model: &str) -> bool {
        model.starts_with("gpt-5") || model.starts_with("o1")
    }

    fn request_body<'a>(request: &'a CompletionRequest) -> OpenAiRequest<'a> {
        if Self::is_reasoning_model(&request.model) {
            OpenAiRequest {
                model: &request.model,
                messages: &request.messages,
                max_tokens: None,
                max_completion_tokens: Some(request.max_tokens),
                temperature: None,
                stream: false,
            }
        } else {
            OpenAiRequest {
                model: &request.model,
                messages: &request.messages,
                max_tokens: Some(request.max_tokens),
                max_completion_tokens: None,
                temperature: Some(TEMPERATURE),
                stream: false,
            }
        }
    }
}

impl CompletionBackend for OpenAiBackend {
    fn complete<'a>(
        &'a self,
        request: &'a CompletionRequest,
        api_key: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<String>>> + Send + 'a>> {
        Box::pin(async move {
            let body = Self::request_body(request);
            let api_url = self.api_url();

            debug!(
                max_tokens = request.max_tokens,
                message_count = body.messages.len(),
                uses_max_completion_tokens = body.max_completion_tokens.is_some(),
                "Built OpenAI-compatible request payload"
            );
            info!(url = %api_url, model = %request.model, "Sending request to OpenAI-compatible API");

            let response = self
                .client
                .post(&api_url)
                .header("Content-Type", "application/json")
                .header("Authorization", format!("Bearer {api_key}"))
                .json(&body)
                .send()
                .await
                .context("Network error while contacting the completion API")?;

            let response = check_error_response(response).await?;

            let openai_response: OpenAiResponse = response
                .json()
                .await
                .context("Invalid response format from the completion API")?;

            debug!(
                choice_count = openai_response.choices.len(),
                model = ?openai_response.model,
                usage = ?openai_response.usage,
                "Received OpenAI-compatible API response"
            );

            Ok(openai_response
                .choices
                .into_iter()
                .map(|choice| choice.message.content.unwrap_or_default())
                .collect())
        })
    }

    fn name(&self) -> &str {
        "OpenAI"
    }
}

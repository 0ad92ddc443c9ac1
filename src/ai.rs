//! Completion backend abstraction and request types.

pub mod description;
pub mod error;
pub mod openai;
pub mod prompts;
#[cfg(test)]
pub(crate) mod test_utils;

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Serialize;

pub use description::DescriptionService;
pub use error::CompletionError;
pub use openai::OpenAiBackend;
pub use prompts::{build_request, DetailLevel};

/// HTTP request timeout for completion calls.
///
/// Large diffs with the high detail level can take minutes to answer;
/// anything beyond this is treated as a backend failure.
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Model used when neither `--model` nor `OPENAI_MODEL` is set.
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Author of a chat message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// Instructions framing the conversation.
    System,
    /// The request itself.
    User,
}

/// A role-tagged message sent to the completion backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    /// Who is speaking.
    pub role: ChatRole,
    /// Message text.
    pub content: String,
}

impl ChatMessage {
    /// Creates a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// Everything the backend needs for one completion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionRequest {
    /// Target model identifier.
    pub model: String,
    /// Messages in the order they are sent.
    pub messages: Vec<ChatMessage>,
    /// Upper bound on the response size, in tokens.
    pub max_tokens: u32,
}

impl CompletionRequest {
    /// Returns the user prompt, which carries the diff.
    pub fn prompt(&self) -> &str {
        self.messages
            .iter()
            .find(|m| m.role == ChatRole::User)
            .map_or("", |m| m.content.as_str())
    }
}

/// A service that turns chat messages into candidate completions.
///
/// Implementations return every candidate text the service produced, in the
/// order it listed them; deciding what to do with zero candidates is left to
/// the caller.
pub trait CompletionBackend: Send + Sync {
    /// Sends one completion request authenticated with `api_key`.
    fn complete<'a>(
        &'a self,
        request: &'a CompletionRequest,
        api_key: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<String>>> + Send + 'a>>;

    /// Returns a human readable name for logs.
    fn name(&self) -> &str;
}

/// Builds an HTTP client with the standard request timeout.
pub(crate) fn build_http_client() -> Result<Client> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .context("Failed to build HTTP client")
}

/// Checks an HTTP response for error status.
///
/// On success, returns the response unchanged for further processing.
/// On failure, reads the error body into the returned error.
pub(crate) async fn check_error_response(response: reqwest::Response) -> Result<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let error_text = response.text().await.unwrap_or_else(|e| {
        tracing::debug!("Failed to read error response body: {e}");
        String::new()
    });
    anyhow::bail!("HTTP {status}: {error_text}")
}

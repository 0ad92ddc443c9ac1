//! Description generation against a completion backend.

use tracing::{debug, info};

use crate::ai::error::CompletionError;
use crate::ai::{CompletionBackend, CompletionRequest};

/// Turns a completion request into description text.
///
/// The backend is supplied by the caller, so tests can substitute a double
/// without touching the process environment.
pub struct DescriptionService<'b> {
    backend: &'b dyn CompletionBackend,
}

impl<'b> DescriptionService<'b> {
    /// Creates a service that sends requests through `backend`.
    pub fn new(backend: &'b dyn CompletionBackend) -> Self {
        Self { backend }
    }

    /// Sends `request` once and returns the first choice verbatim.
    ///
    /// An empty `api_key` fails before the backend is contacted.
    pub async fn generate(
        &self,
        request: &CompletionRequest,
        api_key: &str,
    ) -> Result<String, CompletionError> {
        if api_key.is_empty() {
            return Err(CompletionError::MissingCredentials);
        }

        info!(
            backend = self.backend.name(),
            model = %request.model,
            max_tokens = request.max_tokens,
            prompt_len = request.prompt().len(),
            "Requesting description"
        );

        let choices = self
            .backend
            .complete(request, api_key)
            .await
            .map_err(|e| CompletionError::Backend(format!("{e:#}")))?;

        let text = choices
            .into_iter()
            .next()
            .ok_or(CompletionError::EmptyCompletion)?;

        debug!(response_len = text.len(), "Received description");
        debug!(response_content = %text, "Description content");
        Ok(text)
    }
}

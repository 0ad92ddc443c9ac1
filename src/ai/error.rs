//! Completion-specific error handling.

use thiserror::Error;

/// Failures while generating a description.
#[derive(Error, Debug)]
pub enum CompletionError {
    /// No API key was configured.
    #[error("OpenAI API key not found. Set the OPENAI_API_KEY environment variable")]
    MissingCredentials,

    /// The backend request failed (transport, HTTP status, or response body).
    #[error("Completion request failed: {0}")]
    Backend(String),

    /// The backend answered without any choices.
    #[error("Completion backend returned no choices")]
    EmptyCompletion,
}

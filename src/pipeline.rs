//! The description pipeline: base branch → diff → prompt → completion.

use thiserror::Error;
use tracing::info;

use crate::ai::{
    build_request, CompletionBackend, CompletionError, DescriptionService, DetailLevel,
};
use crate::git::{resolve_base_branch, GitError, RepositoryReader, TreeDiffer};

/// Any failure of the pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Branch resolution or diffing failed.
    #[error(transparent)]
    Git(#[from] GitError),

    /// Description generation failed.
    #[error(transparent)]
    Completion(#[from] CompletionError),
}

/// Result of a successful pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// HEAD has the same content as the base branch; no completion was requested.
    NoChanges,
    /// The generated description text.
    Description(String),
}

/// Per-invocation options.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Base branch to diff against; detected when `None`.
    pub base_branch: Option<String>,
    /// Requested verbosity.
    pub detail: DetailLevel,
    /// Target model identifier.
    pub model: String,
}

/// Runs the whole pipeline against an explicit repository and backend.
pub struct DescriptionPipeline<'a, R: RepositoryReader + ?Sized> {
    repo: &'a R,
    backend: &'a dyn CompletionBackend,
}

impl<'a, R: RepositoryReader + ?Sized> DescriptionPipeline<'a, R> {
    /// Creates a pipeline over `repo` that generates through `backend`.
    pub fn new(repo: &'a R, backend: &'a dyn CompletionBackend) -> Self {
        Self { repo, backend }
    }

    /// Describes the difference between HEAD and the base branch.
    pub async fn run(
        &self,
        options: &PipelineOptions,
        api_key: &str,
    ) -> Result<Outcome, PipelineError> {
        let base_branch = match &options.base_branch {
            Some(branch) => branch.clone(),
            None => resolve_base_branch(self.repo)?,
        };
        info!(base_branch = %base_branch, detail = %options.detail, "Describing changes");

        let differ = TreeDiffer::new(self.repo);
        let changes = differ.change_set(&base_branch)?;
        if changes.is_empty() {
            info!("No changes against base branch, skipping completion");
            return Ok(Outcome::NoChanges);
        }
        let diff = differ.render(&changes)?;

        let request = build_request(&diff, options.detail, &options.model);
        let text = DescriptionService::new(self.backend)
            .generate(&request, api_key)
            .await?;

        Ok(Outcome::Description(text))
    }
}

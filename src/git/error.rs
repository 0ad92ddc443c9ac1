//! Errors raised while resolving branches and diffing trees.

use std::fmt;

use thiserror::Error;

/// Step of the tree diff that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffStage {
    /// Looking up the base branch reference.
    ResolveBaseRef,
    /// Looking up the commit the base branch points at.
    ResolveBaseCommit,
    /// Reading the base commit's tree.
    ResolveBaseTree,
    /// Looking up HEAD.
    ResolveHeadRef,
    /// Looking up the commit HEAD points at.
    ResolveHeadCommit,
    /// Reading the HEAD commit's tree.
    ResolveHeadTree,
    /// Comparing the two trees.
    ComputeChangeSet,
    /// Rendering a change as a unified diff patch.
    RenderPatch,
}

impl fmt::Display for DiffStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let step = match self {
            Self::ResolveBaseRef => "resolve base branch reference",
            Self::ResolveBaseCommit => "resolve base commit",
            Self::ResolveBaseTree => "resolve base tree",
            Self::ResolveHeadRef => "resolve HEAD reference",
            Self::ResolveHeadCommit => "resolve HEAD commit",
            Self::ResolveHeadTree => "resolve HEAD tree",
            Self::ComputeChangeSet => "compute change set",
            Self::RenderPatch => "render patch",
        };
        f.write_str(step)
    }
}

/// Git-side failures of the description pipeline.
#[derive(Error, Debug)]
pub enum GitError {
    /// The repository could not be opened or its references read.
    #[error("Failed to access git repository")]
    RepositoryAccess(#[source] git2::Error),

    /// Neither of the recognised base branch names exists.
    #[error("Neither 'master' nor 'main' branch exists. Create one of them or pass --base")]
    NoBaseBranchFound,

    /// A step of the tree diff failed.
    #[error("Failed to {stage}")]
    Diff {
        /// The step that failed.
        stage: DiffStage,
        /// Underlying repository error.
        #[source]
        source: git2::Error,
    },
}

impl GitError {
    /// Returns the failing diff step, if this is a diff error.
    pub fn stage(&self) -> Option<DiffStage> {
        match self {
            Self::Diff { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

/// Tags a repository result with the diff step it belongs to.
pub(crate) trait DiffStageExt<T> {
    /// Maps the error into [`GitError::Diff`] for `stage`.
    fn at_stage(self, stage: DiffStage) -> Result<T, GitError>;
}

impl<T> DiffStageExt<T> for Result<T, git2::Error> {
    fn at_stage(self, stage: DiffStage) -> Result<T, GitError> {
        self.map_err(|source| GitError::Diff { stage, source })
    }
}

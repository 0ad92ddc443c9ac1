//! Base branch detection.

use tracing::debug;

use crate::git::error::GitError;
use crate::git::repository::RepositoryReader;

/// Recognised base branch names, highest priority first.
pub const BASE_BRANCH_CANDIDATES: [&str; 2] = ["master", "main"];

/// Picks the base branch the current work will be merged into.
///
/// Every local branch is enumerated and compared by short name against
/// [`BASE_BRANCH_CANDIDATES`]. When both exist `master` wins. Tags and
/// remote-tracking refs are never candidates.
pub fn resolve_base_branch<R: RepositoryReader + ?Sized>(repo: &R) -> Result<String, GitError> {
    let references = repo.references().map_err(GitError::RepositoryAccess)?;

    let best = references
        .iter()
        .filter_map(|reference| {
            BASE_BRANCH_CANDIDATES
                .iter()
                .position(|candidate| *candidate == reference.name)
        })
        .min()
        .ok_or(GitError::NoBaseBranchFound)?;

    let branch = BASE_BRANCH_CANDIDATES[best];
    debug!(
        base_branch = branch,
        reference_count = references.len(),
        "Resolved base branch"
    );
    Ok(branch.to_string())
}

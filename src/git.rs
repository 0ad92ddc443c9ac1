//! Git operations: base branch detection and tree diffing.

pub mod branch;
pub mod diff;
pub mod error;
pub mod repository;
pub mod snapshot;
#[cfg(test)]
pub(crate) mod test_utils;

pub use branch::{resolve_base_branch, BASE_BRANCH_CANDIDATES};
pub use diff::{Change, ChangeSet, TreeDiffer};
pub use error::{DiffStage, GitError};
pub use repository::{GitRepository, RepositoryReader};
pub use snapshot::{Reference, ResolvedCommit, TreeEntry, TreeSnapshot};

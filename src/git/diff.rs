//! Structural tree comparison and unified diff rendering.

use std::collections::HashMap;
use std::path::Path;

use git2::{Oid, Patch};
use tracing::{debug, info};

use crate::git::error::{DiffStage, DiffStageExt, GitError};
use crate::git::repository::RepositoryReader;
use crate::git::snapshot::{ResolvedCommit, TreeSnapshot};

/// Mode shown in headers of added and removed files.
const FILE_MODE: &str = "100644";

/// A single file-level difference between two trees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// The path only exists in the head tree.
    Added {
        /// File path.
        path: String,
        /// Blob id in the head tree.
        new_id: Oid,
    },
    /// The path only exists in the base tree.
    Removed {
        /// File path.
        path: String,
        /// Blob id in the base tree.
        old_id: Oid,
    },
    /// The path exists in both trees with different content.
    Modified {
        /// File path.
        path: String,
        /// Blob id in the base tree.
        old_id: Oid,
        /// Blob id in the head tree.
        new_id: Oid,
    },
}

impl Change {
    /// Returns the path this change applies to.
    pub fn path(&self) -> &str {
        match self {
            Self::Added { path, .. } | Self::Removed { path, .. } | Self::Modified { path, .. } => {
                path
            }
        }
    }

    /// Returns the one-letter status used in logs (`A`, `D` or `M`).
    pub fn status(&self) -> char {
        match self {
            Self::Added { .. } => 'A',
            Self::Removed { .. } => 'D',
            Self::Modified { .. } => 'M',
        }
    }

    fn old_id(&self) -> Option<Oid> {
        match self {
            Self::Removed { old_id, .. } | Self::Modified { old_id, .. } => Some(*old_id),
            Self::Added { .. } => None,
        }
    }

    fn new_id(&self) -> Option<Oid> {
        match self {
            Self::Added { new_id, .. } | Self::Modified { new_id, .. } => Some(*new_id),
            Self::Removed { .. } => None,
        }
    }
}

/// Ordered file-level differences between two trees.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    changes: Vec<Change>,
}

impl ChangeSet {
    /// Compares two snapshots path by path.
    ///
    /// Removals and modifications come first in base enumeration order,
    /// followed by additions in head enumeration order. Paths whose content
    /// identity is unchanged are left out. A snapshot listing the same path
    /// twice is rejected.
    pub fn between(base: &TreeSnapshot, head: &TreeSnapshot) -> Result<Self, git2::Error> {
        let head_ids = index_by_path(head)?;
        let base_paths = index_by_path(base)?;

        let mut changes = Vec::new();
        for entry in base.entries() {
            match head_ids.get(entry.path.as_str()) {
                None => changes.push(Change::Removed {
                    path: entry.path.clone(),
                    old_id: entry.id,
                }),
                Some(&new_id) if new_id != entry.id => changes.push(Change::Modified {
                    path: entry.path.clone(),
                    old_id: entry.id,
                    new_id,
                }),
                Some(_) => {}
            }
        }

        for entry in head.entries() {
            if !base_paths.contains_key(entry.path.as_str()) {
                changes.push(Change::Added {
                    path: entry.path.clone(),
                    new_id: entry.id,
                });
            }
        }

        Ok(Self { changes })
    }

    /// Returns the changes in presentation order.
    pub fn changes(&self) -> &[Change] {
        &self.changes
    }

    /// Returns the number of changed files.
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Returns true if the trees were identical.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

fn index_by_path(snapshot: &TreeSnapshot) -> Result<HashMap<&str, Oid>, git2::Error> {
    let mut ids = HashMap::with_capacity(snapshot.len());
    for entry in snapshot.entries() {
        if ids.insert(entry.path.as_str(), entry.id).is_some() {
            return Err(git2::Error::from_str(&format!(
                "duplicate path '{}' in tree snapshot",
                entry.path
            )));
        }
    }
    Ok(ids)
}

/// Renders one change as a unified diff patch.
pub fn render_change<R: RepositoryReader + ?Sized>(
    repo: &R,
    change: &Change,
) -> Result<String, git2::Error> {
    let old_content = change
        .old_id()
        .map(|id| repo.read_blob(id))
        .transpose()?
        .unwrap_or_default();
    let new_content = change
        .new_id()
        .map(|id| repo.read_blob(id))
        .transpose()?
        .unwrap_or_default();

    let path = Path::new(change.path());
    let mut patch = Patch::from_buffers(&old_content, Some(path), &new_content, Some(path), None)?;
    let buf = patch.to_buf()?;

    if buf.is_empty() {
        // No hunks, as for an empty file being added or removed
        return Ok(header_only_patch(change));
    }

    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Renders the file header of a change that has no content hunks.
fn header_only_patch(change: &Change) -> String {
    let path = change.path();
    let mut header = format!("diff --git a/{path} b/{path}\n");
    match change {
        Change::Added { .. } => {
            header.push_str(&format!(
                "new file mode {FILE_MODE}\n--- /dev/null\n+++ b/{path}\n"
            ));
        }
        Change::Removed { .. } => {
            header.push_str(&format!(
                "deleted file mode {FILE_MODE}\n--- a/{path}\n+++ /dev/null\n"
            ));
        }
        Change::Modified { .. } => {
            header.push_str(&format!("--- a/{path}\n+++ b/{path}\n"));
        }
    }
    header
}

/// Diffs the current HEAD against a base branch.
pub struct TreeDiffer<'r, R: RepositoryReader + ?Sized> {
    repo: &'r R,
}

impl<'r, R: RepositoryReader + ?Sized> TreeDiffer<'r, R> {
    /// Creates a differ over `repo`.
    pub fn new(repo: &'r R) -> Self {
        Self { repo }
    }

    /// Returns the unified diff from `base_branch` to HEAD.
    ///
    /// The result only depends on the content of the two trees. An empty
    /// string means the trees are identical.
    pub fn diff(&self, base_branch: &str) -> Result<String, GitError> {
        let changes = self.change_set(base_branch)?;
        self.render(&changes)
    }

    /// Computes the change set from `base_branch` to HEAD without rendering.
    pub fn change_set(&self, base_branch: &str) -> Result<ChangeSet, GitError> {
        let base_ref = self
            .repo
            .branch_reference(base_branch)
            .at_stage(DiffStage::ResolveBaseRef)?;
        let base_commit = self
            .resolve_commit(base_ref.target, &base_ref.name)
            .at_stage(DiffStage::ResolveBaseCommit)?;
        let base_tree = self
            .repo
            .find_tree(&base_commit)
            .at_stage(DiffStage::ResolveBaseTree)?;

        let head_ref = self
            .repo
            .head_reference()
            .at_stage(DiffStage::ResolveHeadRef)?;
        let head_commit = self
            .resolve_commit(head_ref.target, &head_ref.name)
            .at_stage(DiffStage::ResolveHeadCommit)?;
        let head_tree = self
            .repo
            .find_tree(&head_commit)
            .at_stage(DiffStage::ResolveHeadTree)?;

        debug!(
            base_branch,
            base_commit = %base_commit.id,
            head = %head_ref.name,
            head_commit = %head_commit.id,
            base_files = base_tree.len(),
            head_files = head_tree.len(),
            "Resolved trees to compare"
        );

        let changes =
            ChangeSet::between(&base_tree, &head_tree).at_stage(DiffStage::ComputeChangeSet)?;

        for change in changes.changes() {
            debug!(status = %change.status(), path = change.path(), "Change");
        }
        info!(changed_files = changes.len(), "Computed change set");

        Ok(changes)
    }

    /// Renders every change in order and concatenates the patches.
    pub fn render(&self, changes: &ChangeSet) -> Result<String, GitError> {
        let mut diff = String::new();
        for change in changes.changes() {
            let patch = render_change(self.repo, change).at_stage(DiffStage::RenderPatch)?;
            diff.push_str(&patch);
        }

        debug!(diff_len = diff.len(), "Rendered unified diff");
        Ok(diff)
    }

    fn resolve_commit(
        &self,
        target: Option<Oid>,
        name: &str,
    ) -> Result<ResolvedCommit, git2::Error> {
        let id = target.ok_or_else(|| {
            git2::Error::from_str(&format!("reference '{name}' does not point at a commit"))
        })?;
        self.repo.find_commit(id)
    }
}

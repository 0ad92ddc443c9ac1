//! Git repository access.

use std::path::Path;

use anyhow::{Context, Result};
use git2::{ObjectType, Oid, Repository, TreeWalkMode, TreeWalkResult};
use tracing::debug;

use crate::git::snapshot::{Reference, ResolvedCommit, TreeEntry, TreeSnapshot};

/// Read-only view of a version-controlled tree store.
///
/// The diff pipeline only needs these lookups, so anything that can answer
/// them (an on-disk git repository, an in-memory fixture) can be described.
pub trait RepositoryReader {
    /// Enumerates the local branches (`refs/heads/*`) of the repository.
    fn references(&self) -> Result<Vec<Reference>, git2::Error>;

    /// Resolves a local branch by its short name.
    fn branch_reference(&self, name: &str) -> Result<Reference, git2::Error>;

    /// Resolves the current HEAD.
    fn head_reference(&self) -> Result<Reference, git2::Error>;

    /// Looks up a commit by id.
    fn find_commit(&self, id: Oid) -> Result<ResolvedCommit, git2::Error>;

    /// Lists every file in a commit's tree.
    fn find_tree(&self, commit: &ResolvedCommit) -> Result<TreeSnapshot, git2::Error>;

    /// Reads the raw content of a blob.
    fn read_blob(&self, id: Oid) -> Result<Vec<u8>, git2::Error>;
}

/// Git repository wrapper.
pub struct GitRepository {
    repo: Repository,
}

impl GitRepository {
    /// Opens the repository at the specified path.
    pub fn open_at<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = Repository::open(path)
            .with_context(|| format!("Failed to open git repository at {}", path.display()))?;

        Ok(Self { repo })
    }
}

impl RepositoryReader for GitRepository {
    fn references(&self) -> Result<Vec<Reference>, git2::Error> {
        let mut references = Vec::new();

        for reference in self.repo.references()? {
            let reference = reference?;
            if !reference.is_branch() {
                continue;
            }
            let Some(name) = reference.shorthand() else {
                debug!("Skipping reference with non UTF-8 name");
                continue;
            };

            references.push(Reference {
                name: name.to_string(),
                target: reference.resolve().ok().and_then(|r| r.target()),
            });
        }

        Ok(references)
    }

    fn branch_reference(&self, name: &str) -> Result<Reference, git2::Error> {
        let reference = self
            .repo
            .find_reference(&format!("refs/heads/{name}"))?
            .resolve()?;

        Ok(Reference {
            name: name.to_string(),
            target: reference.target(),
        })
    }

    fn head_reference(&self) -> Result<Reference, git2::Error> {
        let head = self.repo.head()?;

        Ok(Reference {
            name: head.shorthand().unwrap_or("HEAD").to_string(),
            target: head.target(),
        })
    }

    fn find_commit(&self, id: Oid) -> Result<ResolvedCommit, git2::Error> {
        let commit = self.repo.find_commit(id)?;

        Ok(ResolvedCommit {
            id: commit.id(),
            tree_id: commit.tree_id(),
        })
    }

    fn find_tree(&self, commit: &ResolvedCommit) -> Result<TreeSnapshot, git2::Error> {
        let tree = self.repo.find_tree(commit.tree_id)?;
        let mut entries = Vec::new();

        tree.walk(TreeWalkMode::PreOrder, |root, entry| {
            // Submodules and subtrees carry no file content of their own
            if entry.kind() == Some(ObjectType::Blob) {
                if let Some(name) = entry.name() {
                    entries.push(TreeEntry {
                        path: format!("{root}{name}"),
                        id: entry.id(),
                    });
                }
            }
            TreeWalkResult::Ok
        })?;

        Ok(TreeSnapshot::new(entries))
    }

    fn read_blob(&self, id: Oid) -> Result<Vec<u8>, git2::Error> {
        let blob = self.repo.find_blob(id)?;
        Ok(blob.content().to_vec())
    }
}

//! Shared test utilities for the `git` module.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::HashMap;

use git2::{ObjectType, Oid};

use crate::git::repository::RepositoryReader;
use crate::git::snapshot::{Reference, ResolvedCommit, TreeEntry, TreeSnapshot};

/// In-memory repository with a fixed enumeration order.
///
/// References are enumerated in creation order and tree entries in the
/// order they were passed to [`commit`](Self::commit), so tests can pin
/// down exactly what a real repository would leave to its storage layout.
/// Blob ids are genuine git blob hashes, so identical content shares an id.
#[derive(Default)]
pub(crate) struct InMemoryRepository {
    references: Vec<Reference>,
    head: Option<String>,
    commits: HashMap<Oid, ResolvedCommit>,
    trees: HashMap<Oid, TreeSnapshot>,
    blobs: HashMap<Oid, Vec<u8>>,
    fail_references: bool,
}

impl InMemoryRepository {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Records a commit with `files` on `branch` and points HEAD at it.
    pub(crate) fn commit(&mut self, branch: &str, files: &[(&str, &str)]) -> Oid {
        let mut entries = Vec::new();
        let mut listing = String::new();
        for (path, content) in files {
            let id = Oid::hash_object(ObjectType::Blob, content.as_bytes()).unwrap();
            self.blobs.insert(id, content.as_bytes().to_vec());
            listing.push_str(&format!("{id} {path}\n"));
            entries.push(TreeEntry {
                path: (*path).to_string(),
                id,
            });
        }

        let tree_id = Oid::hash_object(ObjectType::Tree, listing.as_bytes()).unwrap();
        let commit_id = Oid::hash_object(
            ObjectType::Commit,
            format!("tree {tree_id}\nbranch {branch}\nseq {}\n", self.commits.len()).as_bytes(),
        )
        .unwrap();

        self.trees.insert(tree_id, TreeSnapshot::new(entries));
        self.commits.insert(
            commit_id,
            ResolvedCommit {
                id: commit_id,
                tree_id,
            },
        );

        match self.references.iter_mut().find(|r| r.name == branch) {
            Some(reference) => reference.target = Some(commit_id),
            None => self.references.push(Reference::new(branch, commit_id)),
        }
        self.head = Some(branch.to_string());

        commit_id
    }

    /// Points HEAD at an existing branch.
    pub(crate) fn checkout(&mut self, branch: &str) {
        self.head = Some(branch.to_string());
    }

    /// Makes HEAD unresolvable, as in a freshly initialised repository.
    pub(crate) fn unborn_head(&mut self) {
        self.head = Some("unborn".to_string());
    }

    /// Makes reference enumeration fail with a storage error.
    pub(crate) fn fail_reference_enumeration(&mut self) {
        self.fail_references = true;
    }

    /// Drops all blob contents so that patch rendering fails.
    pub(crate) fn forget_blobs(&mut self) {
        self.blobs.clear();
    }

    /// Drops a commit object while keeping references to it.
    pub(crate) fn forget_commit(&mut self, id: Oid) {
        self.commits.remove(&id);
    }

    /// Drops a tree object while keeping commits that point at it.
    pub(crate) fn forget_tree_of(&mut self, commit: Oid) {
        if let Some(commit) = self.commits.get(&commit) {
            self.trees.remove(&commit.tree_id);
        }
    }

    fn not_found(what: &str) -> git2::Error {
        git2::Error::from_str(&format!("{what} not found"))
    }
}

impl RepositoryReader for InMemoryRepository {
    fn references(&self) -> Result<Vec<Reference>, git2::Error> {
        if self.fail_references {
            return Err(git2::Error::from_str("failed to read refs directory"));
        }
        Ok(self.references.clone())
    }

    fn branch_reference(&self, name: &str) -> Result<Reference, git2::Error> {
        self.references
            .iter()
            .find(|r| r.name == name)
            .cloned()
            .ok_or_else(|| Self::not_found(&format!("reference 'refs/heads/{name}'")))
    }

    fn head_reference(&self) -> Result<Reference, git2::Error> {
        let head = self.head.as_deref().ok_or_else(|| Self::not_found("HEAD"))?;
        self.branch_reference(head)
    }

    fn find_commit(&self, id: Oid) -> Result<ResolvedCommit, git2::Error> {
        self.commits
            .get(&id)
            .copied()
            .ok_or_else(|| Self::not_found(&format!("commit {id}")))
    }

    fn find_tree(&self, commit: &ResolvedCommit) -> Result<TreeSnapshot, git2::Error> {
        self.trees
            .get(&commit.tree_id)
            .cloned()
            .ok_or_else(|| Self::not_found(&format!("tree {}", commit.tree_id)))
    }

    fn read_blob(&self, id: Oid) -> Result<Vec<u8>, git2::Error> {
        self.blobs
            .get(&id)
            .cloned()
            .ok_or_else(|| Self::not_found(&format!("blob {id}")))
    }
}

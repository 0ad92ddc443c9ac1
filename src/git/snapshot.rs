//! Repository objects as seen by the diff pipeline.

use git2::Oid;

/// A named reference and the commit it points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Short name of the reference (e.g., `main`, `feature/login`).
    pub name: String,
    /// Commit the reference resolves to, if it is a direct reference.
    pub target: Option<Oid>,
}

impl Reference {
    /// Creates a reference pointing at `target`.
    pub fn new(name: impl Into<String>, target: Oid) -> Self {
        Self {
            name: name.into(),
            target: Some(target),
        }
    }
}

/// A commit reduced to what the differ needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedCommit {
    /// Content hash of the commit.
    pub id: Oid,
    /// Root tree of the commit.
    pub tree_id: Oid,
}

/// A single file in a tree snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    /// Slash-separated path relative to the repository root.
    pub path: String,
    /// Content identity of the file (blob id).
    pub id: Oid,
}

/// All files of a commit, in the order the repository enumerated them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeSnapshot {
    entries: Vec<TreeEntry>,
}

impl TreeSnapshot {
    /// Creates a snapshot from entries in enumeration order.
    pub fn new(entries: Vec<TreeEntry>) -> Self {
        Self { entries }
    }

    /// Returns the entries in enumeration order.
    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }

    /// Returns the number of files in the snapshot.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the snapshot holds no files.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<TreeEntry> for TreeSnapshot {
    fn from_iter<I: IntoIterator<Item = TreeEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

//! Core data models for the visibility engine

use data_encoding::HEXLOWER;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fmt;

/// Identifier of an upload
pub type UploadId = u64;

/// Commit graph: commit → ordered parents (empty for root commits)
pub type Graph = BTreeMap<String, Vec<String>>;

/// Upload definition
///
/// An indexing artifact anchored to the commit it was produced for,
/// scoped by a root directory and the indexer that produced it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Upload {
    /// Upload identifier
    pub id: UploadId,

    /// Commit the upload was produced for
    pub commit: String,

    /// Root directory of the index (e.g., "sub1/")
    pub root: String,

    /// Indexer name (e.g., "lsif-go")
    pub indexer: String,
}

impl Upload {
    /// Creates a new upload
    pub fn new(id: UploadId, commit: String, root: String, indexer: String) -> Self {
        Self {
            id,
            commit,
            root,
            indexer,
        }
    }

    /// Shadowing key of this upload
    pub fn token(&self) -> Token {
        Token::new(&self.root, &self.indexer)
    }
}

impl fmt::Display for Upload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {}{} @ {}",
            self.id,
            self.root,
            if self.indexer.is_empty() { String::new() } else { format!(" ({})", self.indexer) },
            short_commit(&self.commit)
        )
    }
}

/// Equality key derived from (root, indexer)
///
/// Two uploads with the same token compete for the same queries, so only
/// the nearest one is visible from a given commit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    /// Hashes root and indexer (NUL separated) into a hex encoded SHA-256 token
    pub fn new(root: &str, indexer: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(root.as_bytes());
        hasher.update([0u8]);
        hasher.update(indexer.as_bytes());
        Token(HEXLOWER.encode(&hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Visibility of one upload from one commit
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadMeta {
    /// Upload identifier
    pub upload_id: UploadId,

    /// Number of edges between the viewing commit and the upload's commit
    pub distance: u32,

    /// Whether the upload was reached by walking towards ancestors
    /// (or is defined at the viewing commit)
    pub ancestor_visible: bool,

    /// Whether a closer upload with the same token shadows this one
    pub overwritten: bool,
}

impl UploadMeta {
    /// Meta of an upload defined at the viewing commit
    pub fn local(upload_id: UploadId) -> Self {
        Self {
            upload_id,
            distance: 0,
            ancestor_visible: true,
            overwritten: false,
        }
    }

    /// Returns true when `self` is a strictly better answer than `other`
    ///
    /// Smaller distance wins; equal distances fall back to the smaller id.
    pub fn beats(&self, other: &UploadMeta) -> bool {
        (self.distance, self.upload_id) < (other.distance, other.upload_id)
    }
}

/// First 8 characters of a commit, for display
pub(crate) fn short_commit(commit: &str) -> &str {
    commit.get(..8).unwrap_or(commit)
}

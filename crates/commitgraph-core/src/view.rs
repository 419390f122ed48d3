//! Commit graph views: engine input and compact transfer format

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::CoreError;
use crate::flags::PackedUploadMeta;
use crate::models::{Token, Upload, UploadId, UploadMeta};
use crate::visibility::VisibilityMap;

/// Uploads attached to commits, plus the token of every upload
///
/// Built from upload definitions (distance 0 at their own commit) for a full
/// calculation, or from previously computed visibility for a graph fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitGraphView {
    meta: BTreeMap<String, Vec<UploadMeta>>,
    tokens: BTreeMap<UploadId, Token>,
}

impl CommitGraphView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches `meta` to `commit` and records the token of its upload
    pub fn add(&mut self, meta: UploadMeta, commit: &str, token: Token) {
        self.meta.entry(commit.to_string()).or_default().push(meta);
        self.tokens.insert(meta.upload_id, token);
    }

    /// Attaches an upload to the commit it is defined at
    pub fn add_upload(&mut self, upload: &Upload) {
        self.add(UploadMeta::local(upload.id), &upload.commit, upload.token());
    }

    /// Builds a view from upload definitions
    pub fn from_uploads<'a, I>(uploads: I) -> Self
    where
        I: IntoIterator<Item = &'a Upload>,
    {
        let mut view = Self::new();
        for upload in uploads {
            view.add_upload(upload);
        }
        view
    }

    /// Copies every entry computed for `commit` into this view
    ///
    /// Overwritten entries are copied too; they carry the ancestor-visible
    /// uploads a fragment needs. Entries whose upload has no token in
    /// `tokens` are skipped. Returns the number of entries added.
    pub fn add_visibility(
        &mut self,
        visibility: &VisibilityMap,
        commit: &str,
        tokens: &BTreeMap<UploadId, Token>,
    ) -> usize {
        let mut added = 0;
        for meta in visibility.get(commit) {
            match tokens.get(&meta.upload_id) {
                Some(token) => {
                    self.add(*meta, commit, token.clone());
                    added += 1;
                }
                None => log::debug!("No token for upload {} at {}, skipping", meta.upload_id, commit),
            }
        }
        added
    }

    /// Builds a view holding a whole visibility result
    pub fn from_visibility(visibility: &VisibilityMap, tokens: &BTreeMap<UploadId, Token>) -> Self {
        let mut view = Self::new();
        for commit in visibility.commits() {
            view.add_visibility(visibility, commit, tokens);
        }
        view
    }

    /// Appends every entry and token of `other`
    pub fn extend_from(&mut self, other: &CommitGraphView) {
        for (commit, metas) in &other.meta {
            self.meta.entry(commit.clone()).or_default().extend_from_slice(metas);
        }
        self.tokens.extend(other.tokens.iter().map(|(id, token)| (*id, token.clone())));
    }

    pub fn meta(&self) -> &BTreeMap<String, Vec<UploadMeta>> {
        &self.meta
    }

    /// Entries attached to a commit
    pub fn meta_for(&self, commit: &str) -> &[UploadMeta] {
        self.meta.get(commit).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn tokens(&self) -> &BTreeMap<UploadId, Token> {
        &self.tokens
    }

    pub fn token(&self, upload_id: UploadId) -> Option<&Token> {
        self.tokens.get(&upload_id)
    }

    pub fn is_empty(&self) -> bool {
        self.meta.is_empty()
    }

    /// Converts to the packed transfer form
    pub fn to_packed(&self) -> PackedCommitGraphView {
        PackedCommitGraphView {
            meta: self
                .meta
                .iter()
                .map(|(commit, metas)| {
                    let packed = metas.iter().map(|meta| PackedUploadMeta::from(*meta)).collect();
                    (commit.clone(), packed)
                })
                .collect(),
            tokens: self.tokens.clone(),
        }
    }
}

/// Serialized form of a `CommitGraphView`
///
/// Every meta is collapsed into an upload id and one flags word.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PackedCommitGraphView {
    pub meta: BTreeMap<String, Vec<PackedUploadMeta>>,
    pub tokens: BTreeMap<UploadId, Token>,
}

impl PackedCommitGraphView {
    /// Serializes into compact binary bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, CoreError> {
        bincode::serialize(self).map_err(|e| CoreError::Encoding(e.to_string()))
    }

    /// Deserializes from compact binary bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CoreError> {
        bincode::deserialize(bytes).map_err(|e| CoreError::Encoding(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(self).map_err(|e| CoreError::Encoding(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        serde_json::from_str(json).map_err(|e| CoreError::Encoding(e.to_string()))
    }

    /// Expands into the in-memory form
    ///
    /// Metas whose upload is missing from the token table are dropped.
    pub fn unpack(&self) -> CommitGraphView {
        let mut view = CommitGraphView::new();
        for (commit, metas) in &self.meta {
            for packed in metas {
                match self.tokens.get(&packed.upload_id) {
                    Some(token) => view.add(UploadMeta::from(*packed), commit, token.clone()),
                    None => log::debug!("No token for upload {} at {}, skipping", packed.upload_id, commit),
                }
            }
        }
        view
    }
}

impl From<&CommitGraphView> for PackedCommitGraphView {
    fn from(view: &CommitGraphView) -> Self {
        view.to_packed()
    }
}

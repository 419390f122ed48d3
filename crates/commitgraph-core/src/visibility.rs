//! Result of a visibility calculation

use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::{BTreeMap, BTreeSet};

use crate::models::{Token, UploadId, UploadMeta};

/// Commit → uploads reachable from that commit
///
/// Lists keep overwritten entries; use [`VisibilityMap::visible_at`] for the
/// uploads that actually answer queries.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct VisibilityMap(BTreeMap<String, Vec<UploadMeta>>);

impl VisibilityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// All entries for a commit, overwritten ones included
    pub fn get(&self, commit: &str) -> &[UploadMeta] {
        self.0.get(commit).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_commit(&self, commit: &str) -> bool {
        self.0.contains_key(commit)
    }

    /// Non-overwritten entries for a commit, nearest first
    pub fn visible_at(&self, commit: &str) -> Vec<UploadMeta> {
        let mut visible: Vec<UploadMeta> = self
            .get(commit)
            .iter()
            .filter(|meta| !meta.overwritten)
            .copied()
            .collect();
        visible.sort_by_key(|meta| (meta.distance, meta.upload_id));
        visible
    }

    /// The single nearest upload for a commit
    pub fn nearest(&self, commit: &str) -> Option<UploadMeta> {
        self.visible_at(commit).into_iter().next()
    }

    /// Uploads a query at `tip` would see from its ancestors alone
    ///
    /// Descendant-visible entries are ignored, so an ancestor upload that a
    /// nearer descendant upload overwrote is visible again. One entry per
    /// token, nearest first; entries without a token never conflict.
    pub fn visible_at_tip(&self, tip: &str, tokens: &BTreeMap<UploadId, Token>) -> Vec<UploadMeta> {
        let mut found: Vec<UploadMeta> = self
            .get(tip)
            .iter()
            .filter(|meta| meta.ancestor_visible)
            .map(|meta| UploadMeta { overwritten: false, ..*meta })
            .collect();
        found.sort_by_key(|meta| (meta.distance, meta.upload_id));

        let mut seen = BTreeSet::new();
        found.retain(|meta| match tokens.get(&meta.upload_id) {
            Some(token) => seen.insert(token),
            None => true,
        });
        found
    }

    pub fn commits(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Vec<UploadMeta>> {
        self.0.iter()
    }

    /// Number of commits
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total number of (commit, upload) rows
    pub fn entry_count(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    pub fn overwritten_count(&self) -> usize {
        self.0
            .values()
            .flatten()
            .filter(|meta| meta.overwritten)
            .count()
    }

    pub fn into_inner(self) -> BTreeMap<String, Vec<UploadMeta>> {
        self.0
    }
}

impl From<BTreeMap<String, Vec<UploadMeta>>> for VisibilityMap {
    fn from(inner: BTreeMap<String, Vec<UploadMeta>>) -> Self {
        Self(inner)
    }
}

impl<'a> IntoIterator for &'a VisibilityMap {
    type Item = (&'a String, &'a Vec<UploadMeta>);
    type IntoIter = btree_map::Iter<'a, String, Vec<UploadMeta>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

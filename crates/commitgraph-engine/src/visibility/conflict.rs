//! Resolution of uploads competing for the same token

use commitgraph_core::{Token, UploadId, UploadMeta};
use std::collections::{BTreeMap, HashMap};

/// Small integer key per distinct token
///
/// Built once per calculation so lists compare `u32` keys instead of
/// looking up and comparing hex digests.
#[derive(Debug, Clone, Default)]
pub struct TokenKeys(HashMap<UploadId, u32>);

impl TokenKeys {
    pub fn new(tokens: &BTreeMap<UploadId, Token>) -> Self {
        let mut interned: HashMap<&Token, u32> = HashMap::new();
        let mut keys = HashMap::with_capacity(tokens.len());
        for (upload_id, token) in tokens {
            let next = interned.len() as u32;
            keys.insert(*upload_id, *interned.entry(token).or_insert(next));
        }
        Self(keys)
    }

    pub fn key(&self, upload_id: UploadId) -> Option<u32> {
        self.0.get(&upload_id).copied()
    }
}

/// Uploads visible from one commit, indexed by token
///
/// `slots` maps each token key to the position of its non-overwritten
/// entry, so a merge costs one hash lookup regardless of list length.
#[derive(Debug, Clone, Default)]
pub struct UploadList {
    entries: Vec<UploadMeta>,
    slots: HashMap<u32, usize>,
}

impl UploadList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indexes existing entries; the first non-overwritten entry of a token
    /// owns its slot
    pub fn from_entries(entries: Vec<UploadMeta>, keys: &TokenKeys) -> Self {
        let mut slots = HashMap::with_capacity(entries.len());
        for (idx, meta) in entries.iter().enumerate() {
            if meta.overwritten {
                continue;
            }
            if let Some(key) = keys.key(meta.upload_id) {
                slots.entry(key).or_insert(idx);
            }
        }
        Self { entries, slots }
    }

    /// Same rule as [`merge`], using the token index
    pub fn merge(&mut self, candidate: UploadMeta, replace: bool, keys: &TokenKeys) {
        let Some(key) = keys.key(candidate.upload_id) else {
            self.entries.push(candidate);
            return;
        };

        let existing = self.slots.get(&key).copied();
        if let Some(idx) = resolve(&mut self.entries, existing, candidate, replace) {
            self.slots.insert(key, idx);
        }
    }

    pub fn entries(&self) -> &[UploadMeta] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<UploadMeta> {
        self.entries
    }
}

/// Merges `candidate` into the uploads visible from one commit
///
/// The list holds at most one non-overwritten entry per token. When the
/// candidate shares a token with that entry it takes its place only if it
/// is nearer (smaller upload id on equal distance); a losing candidate is
/// dropped. With `replace` unset, the displaced entry is kept at the end of
/// the list marked as overwritten.
///
/// Uploads without a token in `tokens` never conflict with anything.
/// This scans the list; repeated merges into one list go through
/// [`UploadList`].
pub fn merge(
    list: &mut Vec<UploadMeta>,
    candidate: UploadMeta,
    replace: bool,
    tokens: &BTreeMap<UploadId, Token>,
) {
    let Some(token) = tokens.get(&candidate.upload_id) else {
        list.push(candidate);
        return;
    };

    let existing = list
        .iter()
        .position(|meta| !meta.overwritten && tokens.get(&meta.upload_id) == Some(token));
    resolve(list, existing, candidate, replace);
}

/// Applies the conflict rule against the same-token entry at `existing`
///
/// Returns the slot the candidate now occupies, or `None` if it lost.
fn resolve(
    entries: &mut Vec<UploadMeta>,
    existing: Option<usize>,
    candidate: UploadMeta,
    replace: bool,
) -> Option<usize> {
    match existing {
        None => {
            entries.push(candidate);
            Some(entries.len() - 1)
        }
        Some(idx) if candidate.beats(&entries[idx]) => {
            if !replace {
                let mut shadowed = entries[idx];
                shadowed.overwritten = true;
                entries.push(shadowed);
            }
            entries[idx] = candidate;
            Some(idx)
        }
        Some(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(upload_id: UploadId, distance: u32, ancestor_visible: bool) -> UploadMeta {
        UploadMeta { upload_id, distance, ancestor_visible, overwritten: false }
    }

    /// Uploads 1..=3 share a token, 10 has its own
    fn tokens() -> BTreeMap<UploadId, Token> {
        let shared = Token::new("sub/", "lsif-go");
        let mut tokens = BTreeMap::new();
        for id in 1..=3 {
            tokens.insert(id, shared.clone());
        }
        tokens.insert(10, Token::new("other/", "lsif-go"));
        tokens
    }

    #[test]
    fn test_distinct_tokens_append() {
        let mut list = vec![meta(1, 2, true)];
        merge(&mut list, meta(10, 5, true), true, &tokens());
        assert_eq!(list, vec![meta(1, 2, true), meta(10, 5, true)]);
    }

    #[test]
    fn test_closer_candidate_replaces() {
        let mut list = vec![meta(10, 1, true), meta(1, 3, true)];
        merge(&mut list, meta(2, 2, true), true, &tokens());
        assert_eq!(list, vec![meta(10, 1, true), meta(2, 2, true)]);
    }

    #[test]
    fn test_farther_candidate_dropped() {
        let mut list = vec![meta(2, 1, true)];
        merge(&mut list, meta(1, 2, true), false, &tokens());
        assert_eq!(list, vec![meta(2, 1, true)]);
    }

    #[test]
    fn test_tie_goes_to_smaller_id() {
        let mut list = vec![meta(3, 2, true)];
        merge(&mut list, meta(2, 2, true), true, &tokens());
        assert_eq!(list, vec![meta(2, 2, true)]);

        merge(&mut list, meta(3, 2, true), true, &tokens());
        assert_eq!(list, vec![meta(2, 2, true)]);
    }

    #[test]
    fn test_no_replace_keeps_shadowed_entry() {
        let mut list = vec![meta(1, 3, true), meta(10, 1, true)];
        merge(&mut list, meta(2, 1, false), false, &tokens());

        let mut shadowed = meta(1, 3, true);
        shadowed.overwritten = true;
        assert_eq!(list, vec![meta(2, 1, false), meta(10, 1, true), shadowed]);

        // The overwritten copy no longer competes
        merge(&mut list, meta(3, 2, false), false, &tokens());
        assert_eq!(list.len(), 3);
        assert_eq!(list.iter().filter(|m| !m.overwritten).count(), 2);
    }

    #[test]
    fn test_unknown_upload_appended() {
        let mut list = vec![meta(1, 0, true)];
        merge(&mut list, meta(99, 0, true), true, &tokens());
        merge(&mut list, meta(99, 1, true), true, &tokens());
        assert_eq!(list.len(), 3);
    }

    // ── indexed list ──

    #[test]
    fn test_token_keys_shared_by_equal_tokens() {
        let keys = TokenKeys::new(&tokens());
        assert_eq!(keys.key(1), keys.key(3));
        assert_ne!(keys.key(1), keys.key(10));
        assert_eq!(keys.key(99), None);
    }

    #[test]
    fn test_indexed_list_matches_scanning_merge() {
        let tokens = tokens();
        let keys = TokenKeys::new(&tokens);
        let start = vec![meta(1, 3, true), meta(10, 1, true)];
        let candidates = [
            (meta(2, 1, false), false),
            (meta(3, 2, false), false),
            (meta(3, 0, false), false),
            (meta(10, 4, false), true),
            (meta(99, 0, false), true),
        ];

        let mut scanned = start.clone();
        let mut indexed = UploadList::from_entries(start, &keys);
        for (candidate, replace) in candidates {
            merge(&mut scanned, candidate, replace, &tokens);
            indexed.merge(candidate, replace, &keys);
        }

        assert_eq!(indexed.entries(), scanned.as_slice());
        assert_eq!(indexed.entries().iter().filter(|m| m.overwritten).count(), 2);
    }

    #[test]
    fn test_indexed_list_ignores_overwritten_entries() {
        let keys = TokenKeys::new(&tokens());
        let mut shadowed = meta(1, 0, true);
        shadowed.overwritten = true;

        let mut list = UploadList::from_entries(vec![shadowed, meta(2, 3, true)], &keys);
        list.merge(meta(3, 2, true), true, &keys);
        assert_eq!(list.entries(), &[shadowed, meta(3, 2, true)]);
    }
}

//! Combination of both propagation directions into the final result

use commitgraph_core::{Token, UploadId, VisibilityMap};
use std::collections::BTreeMap;

use super::conflict::{TokenKeys, UploadList};
use super::propagate::{CommitLists, Ordering};

/// Merges descendant-visible uploads on top of ancestor-visible ones
///
/// A nearer descendant upload demotes a same-token ancestor upload to
/// overwritten instead of removing it. Every commit of the ordering is
/// present in the result.
///
/// Both lists must be aligned with `ordering`, as returned by the
/// propagation passes.
pub fn combine_visibility(
    ordering: &Ordering,
    ancestors: CommitLists,
    descendants: CommitLists,
    tokens: &BTreeMap<UploadId, Token>,
) -> VisibilityMap {
    debug_assert_eq!(ancestors.len(), ordering.len(), "ancestor lists not aligned with ordering");
    debug_assert_eq!(descendants.len(), ordering.len(), "descendant lists not aligned with ordering");

    let keys = TokenKeys::new(tokens);
    let combined: BTreeMap<_, _> = ordering
        .commits()
        .iter()
        .zip(ancestors.into_iter().zip(descendants))
        .map(|(commit, (above, below))| {
            let mut list = UploadList::from_entries(above, &keys);
            for meta in below {
                list.merge(meta, false, &keys);
            }
            (commit.clone(), list.into_entries())
        })
        .collect();

    VisibilityMap::from(combined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use commitgraph_core::{Graph, UploadMeta};

    fn meta(upload_id: u64, distance: u32, ancestor_visible: bool, overwritten: bool) -> UploadMeta {
        UploadMeta { upload_id, distance, ancestor_visible, overwritten }
    }

    #[test]
    fn test_descendant_demotes_farther_ancestor() {
        let mut g = Graph::new();
        g.insert("a".to_string(), vec![]);
        let ordering = Ordering::new(&g).unwrap();

        let mut tokens = BTreeMap::new();
        tokens.insert(1, Token::new("r/", "lsif-go"));
        tokens.insert(2, Token::new("r/", "lsif-go"));
        tokens.insert(3, Token::new("s/", "lsif-go"));

        let ancestors = vec![vec![meta(1, 4, true, false), meta(3, 1, true, false)]];
        let descendants = vec![vec![meta(2, 2, false, false), meta(3, 5, false, false)]];
        let result = combine_visibility(&ordering, ancestors, descendants, &tokens);

        assert_eq!(
            result.get("a"),
            &[meta(2, 2, false, false), meta(3, 1, true, false), meta(1, 4, true, true)]
        );
    }

    #[test]
    fn test_equal_distance_keeps_smaller_id() {
        let mut g = Graph::new();
        g.insert("a".to_string(), vec![]);
        let ordering = Ordering::new(&g).unwrap();

        let mut tokens = BTreeMap::new();
        tokens.insert(1, Token::new("r/", "lsif-go"));
        tokens.insert(2, Token::new("r/", "lsif-go"));

        let result = combine_visibility(
            &ordering,
            vec![vec![meta(2, 1, true, false)]],
            vec![vec![meta(1, 1, false, false)]],
            &tokens,
        );
        assert_eq!(result.get("a"), &[meta(1, 1, false, false), meta(2, 1, true, true)]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "not aligned with ordering")]
    fn test_misaligned_lists_rejected() {
        let mut g = Graph::new();
        g.insert("a".to_string(), vec![]);
        g.insert("b".to_string(), vec!["a".to_string()]);
        let ordering = Ordering::new(&g).unwrap();

        combine_visibility(&ordering, vec![vec![]], vec![vec![], vec![]], &BTreeMap::new());
    }
}

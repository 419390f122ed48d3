//! Directional propagation of uploads along the commit graph

use commitgraph_core::{CommitGraphView, CoreError, Graph, UploadMeta};
use std::collections::HashMap;

use super::conflict::{TokenKeys, UploadList};
use crate::graph::topological_sort;

/// Uploads visible from each commit, aligned with [`Ordering::commits`]
pub type CommitLists = Vec<Vec<UploadMeta>>;

/// Topological order of a graph plus each commit's position in it
#[derive(Debug, Clone)]
pub struct Ordering {
    commits: Vec<String>,
    positions: HashMap<String, usize>,
}

impl Ordering {
    /// Orders `graph`, failing if it contains a cycle
    pub fn new(graph: &Graph) -> Result<Self, CoreError> {
        let commits = topological_sort(graph)?;
        let positions = commits
            .iter()
            .enumerate()
            .map(|(idx, commit)| (commit.clone(), idx))
            .collect();
        Ok(Self { commits, positions })
    }

    /// Commits, parents before children
    pub fn commits(&self) -> &[String] {
        &self.commits
    }

    pub fn position(&self, commit: &str) -> Option<usize> {
        self.positions.get(commit).copied()
    }

    pub fn len(&self) -> usize {
        self.commits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }
}

/// Uploads visible from each commit by walking towards its ancestors
///
/// Every commit starts with the ancestor-visible entries the view attaches
/// to it; then, parents first, each commit inherits its parents' uploads
/// one step further away.
pub fn ancestor_visibility(ordering: &Ordering, graph: &Graph, view: &CommitGraphView) -> CommitLists {
    propagate(ordering, graph, view, true)
}

/// Uploads visible from each commit by walking towards its descendants
///
/// `children` is the reversed graph. Commits are visited children first and
/// inherit their children's uploads one step further away.
pub fn descendant_visibility(ordering: &Ordering, children: &Graph, view: &CommitGraphView) -> CommitLists {
    propagate(ordering, children, view, false)
}

fn propagate(ordering: &Ordering, edges: &Graph, view: &CommitGraphView, ancestors: bool) -> CommitLists {
    let keys = TokenKeys::new(view.tokens());
    let mut lists: Vec<UploadList> = ordering
        .commits
        .iter()
        .map(|commit| {
            let mut list = UploadList::new();
            for meta in view.meta_for(commit) {
                if let Some(seed) = seed(meta, ancestors) {
                    list.merge(seed, true, &keys);
                }
            }
            list
        })
        .collect();

    let n = lists.len();
    for step in 0..n {
        let idx = if ancestors { step } else { n - 1 - step };
        let Some(neighbours) = edges.get(&ordering.commits[idx]) else {
            continue;
        };

        for neighbour in neighbours {
            let Some(source_idx) = ordering.position(neighbour) else {
                continue;
            };
            let Some((list, source)) = split_pair(&mut lists, idx, source_idx) else {
                continue;
            };

            for meta in source.entries() {
                let candidate = UploadMeta {
                    upload_id: meta.upload_id,
                    distance: meta.distance.saturating_add(1),
                    ancestor_visible: ancestors,
                    overwritten: false,
                };
                list.merge(candidate, true, &keys);
            }
        }
    }

    lists.into_iter().map(UploadList::into_entries).collect()
}

/// Initial entry of a view meta for one direction
///
/// Uploads defined at the commit (distance 0) seed both directions. Other
/// entries seed the direction they were discovered in; overwritten
/// ancestor-visible entries are revived since the overwrite happens after
/// both directions are combined.
fn seed(meta: &UploadMeta, ancestors: bool) -> Option<UploadMeta> {
    let local = meta.distance == 0;
    if ancestors && (meta.ancestor_visible || local) {
        Some(UploadMeta { ancestor_visible: true, overwritten: false, ..*meta })
    } else if !ancestors && (!meta.ancestor_visible || local) {
        Some(UploadMeta { ancestor_visible: false, overwritten: false, ..*meta })
    } else {
        None
    }
}

/// Mutable reference to `items[target]` alongside `items[source]`
fn split_pair<T>(items: &mut [T], target: usize, source: usize) -> Option<(&mut T, &T)> {
    if target == source {
        return None;
    }
    if source < target {
        let (lo, hi) = items.split_at_mut(target);
        Some((&mut hi[0], &lo[source]))
    } else {
        let (lo, hi) = items.split_at_mut(source);
        Some((&mut lo[target], &hi[0]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::reverse_graph;
    use commitgraph_core::Upload;

    fn graph(edges: &[(&str, Vec<&str>)]) -> Graph {
        edges
            .iter()
            .map(|(commit, parents)| {
                (commit.to_string(), parents.iter().map(|p| p.to_string()).collect())
            })
            .collect()
    }

    fn upload(id: u64, commit: &str, root: &str) -> Upload {
        Upload::new(id, commit.to_string(), root.to_string(), "lsif-go".to_string())
    }

    fn at<'a>(ordering: &Ordering, lists: &'a CommitLists, commit: &str) -> &'a [UploadMeta] {
        &lists[ordering.position(commit).unwrap()]
    }

    fn meta(upload_id: u64, distance: u32, ancestor_visible: bool) -> UploadMeta {
        UploadMeta { upload_id, distance, ancestor_visible, overwritten: false }
    }

    // a <- b <- c <- d, with a second branch a <- x
    fn linear() -> Graph {
        graph(&[
            ("a", vec![]),
            ("b", vec!["a"]),
            ("c", vec!["b"]),
            ("d", vec!["c"]),
            ("x", vec!["a"]),
        ])
    }

    #[test]
    fn test_ancestor_pass_counts_hops() {
        let g = linear();
        let ordering = Ordering::new(&g).unwrap();
        let view = CommitGraphView::from_uploads(&[upload(1, "a", "r/"), upload(2, "c", "s/")]);
        let lists = ancestor_visibility(&ordering, &g, &view);

        assert_eq!(at(&ordering, &lists, "a"), &[meta(1, 0, true)]);
        assert_eq!(at(&ordering, &lists, "d"), &[meta(2, 1, true), meta(1, 3, true)]);
        assert_eq!(at(&ordering, &lists, "x"), &[meta(1, 1, true)]);
    }

    #[test]
    fn test_ancestor_pass_nearest_same_token_wins() {
        let g = linear();
        let ordering = Ordering::new(&g).unwrap();
        let view = CommitGraphView::from_uploads(&[upload(1, "a", "r/"), upload(2, "c", "r/")]);
        let lists = ancestor_visibility(&ordering, &g, &view);

        assert_eq!(at(&ordering, &lists, "b"), &[meta(1, 1, true)]);
        assert_eq!(at(&ordering, &lists, "d"), &[meta(2, 1, true)]);
    }

    #[test]
    fn test_descendant_pass_counts_hops() {
        let g = linear();
        let ordering = Ordering::new(&g).unwrap();
        let children = reverse_graph(&g);
        let view = CommitGraphView::from_uploads(&[upload(1, "d", "r/"), upload(2, "x", "r/")]);
        let lists = descendant_visibility(&ordering, &children, &view);

        assert_eq!(at(&ordering, &lists, "d"), &[meta(1, 0, false)]);
        assert_eq!(at(&ordering, &lists, "b"), &[meta(1, 2, false)]);
        // x is one hop away from a, d is three
        assert_eq!(at(&ordering, &lists, "a"), &[meta(2, 1, false)]);
    }

    #[test]
    fn test_seed_directions() {
        let local = UploadMeta::local(1);
        assert_eq!(seed(&local, true), Some(meta(1, 0, true)));
        assert_eq!(seed(&local, false), Some(meta(1, 0, false)));

        let shadowed = UploadMeta { upload_id: 2, distance: 3, ancestor_visible: true, overwritten: true };
        assert_eq!(seed(&shadowed, true), Some(meta(2, 3, true)));
        assert_eq!(seed(&shadowed, false), None);

        let below = meta(3, 2, false);
        assert_eq!(seed(&below, true), None);
        assert_eq!(seed(&below, false), Some(below));
    }

    #[test]
    fn test_uploads_outside_graph_ignored() {
        let g = linear();
        let ordering = Ordering::new(&g).unwrap();
        let view = CommitGraphView::from_uploads(&[upload(1, "zzz", "r/")]);
        let lists = ancestor_visibility(&ordering, &g, &view);
        assert!(lists.iter().all(Vec::is_empty));
    }
}

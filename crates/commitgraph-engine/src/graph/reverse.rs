//! Child adjacency of the commit graph

use commitgraph_core::Graph;

/// Inverts parent edges into a commit → children map
///
/// Every key of `graph` is present in the result (with no children if
/// nothing points at it), as is every parent referenced by an edge.
pub fn reverse_graph(graph: &Graph) -> Graph {
    let mut reversed: Graph = graph.keys().map(|commit| (commit.clone(), Vec::new())).collect();

    for (commit, parents) in graph {
        for parent in parents {
            reversed.entry(parent.clone()).or_default().push(commit.clone());
        }
    }

    reversed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(edges: &[(&str, Vec<&str>)]) -> Graph {
        edges
            .iter()
            .map(|(commit, parents)| {
                (commit.to_string(), parents.iter().map(|p| p.to_string()).collect())
            })
            .collect()
    }

    #[test]
    fn test_reverse_graph() {
        let g = graph(&[
            ("a", vec!["b", "c"]),
            ("b", vec!["d"]),
            ("c", vec!["d"]),
            ("d", vec![]),
            ("e", vec!["a"]),
        ]);
        let expected = graph(&[
            ("a", vec!["e"]),
            ("b", vec!["a"]),
            ("c", vec!["a"]),
            ("d", vec!["b", "c"]),
            ("e", vec![]),
        ]);
        assert_eq!(reverse_graph(&g), expected);
    }

    #[test]
    fn test_reverse_includes_missing_parents() {
        let g = graph(&[("b", vec!["a"])]);
        let reversed = reverse_graph(&g);
        assert_eq!(reversed["a"], vec!["b".to_string()]);
        assert!(reversed["b"].is_empty());
    }

    #[test]
    fn test_reverse_twice_restores_edges() {
        let g = graph(&[("a", vec![]), ("b", vec!["a"]), ("c", vec!["a", "b"])]);
        assert_eq!(reverse_graph(&reverse_graph(&g)), g);
    }
}

//! Topological ordering of the commit graph

use commitgraph_core::{CoreError, Graph};
use std::collections::HashMap;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    InProgress,
    Done,
}

/// One DFS frame: a commit and the index of the next parent to visit
struct Frame<'a> {
    commit: &'a str,
    next_parent: usize,
}

/// Orders commits so that every parent comes before its children
///
/// Depth-first search over parent edges with an explicit stack, so very long
/// linear histories do not exhaust the call stack. Roots are taken in key
/// order and parents in listed order, which keeps the result deterministic.
/// Parents that are not keys of `graph` are treated as root commits and
/// included in the ordering.
pub fn topological_sort(graph: &Graph) -> Result<Vec<String>, CoreError> {
    let mut marks: HashMap<&str, Mark> = HashMap::with_capacity(graph.len());
    let mut order = Vec::with_capacity(graph.len());
    let mut stack: Vec<Frame> = Vec::new();

    for start in graph.keys() {
        if marks.contains_key(start.as_str()) {
            continue;
        }

        marks.insert(start.as_str(), Mark::InProgress);
        stack.push(Frame { commit: start.as_str(), next_parent: 0 });

        while let Some(frame) = stack.last_mut() {
            let parents = graph.get(frame.commit).map(Vec::as_slice).unwrap_or(&[]);

            match parents.get(frame.next_parent) {
                Some(parent) => {
                    frame.next_parent += 1;
                    match marks.get(parent.as_str()) {
                        Some(Mark::Done) => {}
                        Some(Mark::InProgress) => {
                            return Err(CoreError::CyclicCommitGraph { commit: parent.clone() });
                        }
                        None => {
                            marks.insert(parent.as_str(), Mark::InProgress);
                            stack.push(Frame { commit: parent.as_str(), next_parent: 0 });
                        }
                    }
                }
                None => {
                    // All parents placed
                    marks.insert(frame.commit, Mark::Done);
                    order.push(frame.commit.to_string());
                    stack.pop();
                }
            }
        }
    }

    log::debug!("Ordered {} commits ({} graph keys)", order.len(), graph.len());
    Ok(order)
}

//! Commit graph parsing from `git log` output

use commitgraph_core::{CoreError, Graph};

/// Parses the output of `git log --pretty='%H %P'`
///
/// Each line holds a commit followed by its parents, separated by
/// whitespace. Blank lines are skipped; a commit listed twice gets the
/// parents of both lines (duplicates removed).
pub fn parse_commit_graph(output: &str) -> Result<Graph, CoreError> {
    let mut graph = Graph::new();

    for (line_no, line) in output.lines().enumerate() {
        let mut fields = line.split_whitespace();
        let Some(commit) = fields.next() else {
            continue;
        };

        if !is_commit_id(commit) {
            return Err(CoreError::InvalidGraphLine(format!(
                "line {}: {:?} is not a commit id",
                line_no + 1,
                commit
            )));
        }

        let parents = graph.entry(commit.to_string()).or_default();
        for parent in fields {
            if !is_commit_id(parent) {
                return Err(CoreError::InvalidGraphLine(format!(
                    "line {}: {:?} is not a commit id",
                    line_no + 1,
                    parent
                )));
            }
            if !parents.iter().any(|p| p == parent) {
                parents.push(parent.to_string());
            }
        }
    }

    Ok(graph)
}

/// Hex object name, full or abbreviated
fn is_commit_id(s: &str) -> bool {
    s.len() >= 4 && s.chars().all(|c| c.is_ascii_hexdigit())
}

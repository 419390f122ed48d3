//! Commit graph utilities
//!
//! - Topological ordering with cycle detection (order.rs)
//! - Child adjacency (reverse.rs)
//! - Parsing `git log` output (parse.rs)

mod order;
mod parse;
mod reverse;

pub use order::topological_sort;
pub use parse::parse_commit_graph;
pub use reverse::reverse_graph;

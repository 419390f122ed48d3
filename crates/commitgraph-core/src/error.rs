//! Error types for commitgraph-core

/// Errors shared by the commit graph crates
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Commit graph contains a cycle through {commit}")]
    CyclicCommitGraph { commit: String },

    #[error("Invalid commit graph line: {0}")]
    InvalidGraphLine(String),

    #[error("View encoding error: {0}")]
    Encoding(String),
}

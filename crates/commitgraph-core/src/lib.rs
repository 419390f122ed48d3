//! Commitgraph Core - Shared data models for upload visibility
//!
//! This crate defines the structures passed between the engine and its
//! callers: uploads and their shadowing tokens, per-commit `UploadMeta`,
//! the `CommitGraphView` input/transfer format with its packed flags
//! encoding, and the `VisibilityMap` result.

mod error;
pub mod flags;
mod models;
mod view;
mod visibility;

pub use error::CoreError;
pub use flags::{PackedUploadMeta, FLAG_ANCESTOR_VISIBLE, FLAG_OVERWRITTEN, MAX_DISTANCE};
pub use models::{Graph, Token, Upload, UploadId, UploadMeta};
pub use view::{CommitGraphView, PackedCommitGraphView};
pub use visibility::VisibilityMap;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_depends_on_root_and_indexer() {
        assert_eq!(Token::new("sub1/", "lsif-go"), Token::new("sub1/", "lsif-go"));
        assert_ne!(Token::new("sub1/", "lsif-go"), Token::new("sub2/", "lsif-go"));
        assert_ne!(Token::new("sub1/", "lsif-go"), Token::new("sub1/", "scip-go"));
        // The separator keeps ("a", "bc") and ("ab", "c") apart
        assert_ne!(Token::new("a", "bc"), Token::new("ab", "c"));
    }

    #[test]
    fn test_meta_tiebreak() {
        let near = UploadMeta { upload_id: 9, distance: 1, ancestor_visible: true, overwritten: false };
        let far = UploadMeta { upload_id: 2, distance: 3, ancestor_visible: true, overwritten: false };
        let tie = UploadMeta { upload_id: 4, distance: 1, ancestor_visible: false, overwritten: false };
        assert!(near.beats(&far));
        assert!(tie.beats(&near));
        assert!(!near.beats(&near));
    }
}

//! Upload visibility logic
//!
//! This module handles the propagation of uploads over the commit graph:
//! - Conflict resolution between same-token uploads (conflict.rs)
//! - Ancestor-ward and descendant-ward passes (propagate.rs)
//! - Combining both passes (combine.rs)

mod combine;
mod conflict;
mod propagate;

pub use combine::combine_visibility;
pub use conflict::{merge, TokenKeys, UploadList};
pub use propagate::{ancestor_visibility, descendant_visibility, CommitLists, Ordering};

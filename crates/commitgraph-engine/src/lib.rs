//! Commitgraph Engine - Upload visibility over commit graphs
//!
//! This crate is responsible for:
//! - Ordering the commit graph topologically and detecting cycles
//! - Propagating uploads towards ancestors and towards descendants
//! - Resolving same-token uploads so each commit sees the nearest one
//! - Combining both directions into a `VisibilityMap`

mod calculator;
pub mod formatting;
pub mod graph;
mod stats;
pub mod visibility;

pub use calculator::{calculate_visible_uploads, Calculator, CalculatorOptions};
pub use stats::VisibilityStats;

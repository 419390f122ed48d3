//! Output formatting structures for CLI display

use tabled::Tabled;

/// Table row for displaying one visible upload
#[derive(Tabled)]
pub struct VisibilityRow {
    #[tabled(rename = "Commit")]
    pub commit: String,
    #[tabled(rename = "Upload")]
    pub upload: String,
    #[tabled(rename = "Root")]
    pub root: String,
    #[tabled(rename = "Indexer")]
    pub indexer: String,
    #[tabled(rename = "Distance")]
    pub distance: u32,
    #[tabled(rename = "Found via")]
    pub direction: String,
    #[tabled(rename = "Status")]
    pub status: String,
}

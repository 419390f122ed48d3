//! Statistics of a visibility calculation

use commitgraph_core::VisibilityMap;
use std::time::Duration;

use crate::formatting::{format_duration, format_number};

/// Visibility statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibilityStats {
    pub commits: usize,
    pub entries: usize,
    pub overwritten: usize,
    /// Non-overwritten entries found towards ancestors
    pub ancestor_visible: usize,
    pub elapsed_time: Duration,
}

impl VisibilityStats {
    /// Collects counts from a result
    pub fn from_visibility(visibility: &VisibilityMap, elapsed_time: Duration) -> Self {
        let mut stats = Self {
            commits: visibility.len(),
            elapsed_time,
            ..Self::default()
        };

        for (_, metas) in visibility {
            stats.entries += metas.len();
            for meta in metas {
                if meta.overwritten {
                    stats.overwritten += 1;
                } else if meta.ancestor_visible {
                    stats.ancestor_visible += 1;
                }
            }
        }

        stats
    }

    /// Entries that answer queries
    pub fn visible(&self) -> usize {
        self.entries - self.overwritten
    }
}

impl std::fmt::Display for VisibilityStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Commits: {} | Uploads: {} visible ({} from ancestors), {} overwritten | Time: {}",
            format_number(self.commits),
            format_number(self.visible()),
            format_number(self.ancestor_visible),
            format_number(self.overwritten),
            format_duration(self.elapsed_time)
        )
    }
}

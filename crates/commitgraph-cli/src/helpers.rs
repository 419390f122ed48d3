//! Helper functions for CLI operations

use anyhow::{Context, Result};
use commitgraph_core::{UploadMeta, VisibilityMap};
use commitgraph_engine::{Calculator, CalculatorOptions, VisibilityStats};
use regex::Regex;
use tabled::{Table, settings::{Style, Color, Modify, object::Rows}};

use crate::input::Input;
use crate::output::VisibilityRow;

/// Runs the calculator over the loaded input
pub fn calculate(input: &Input, options: CalculatorOptions) -> Result<(VisibilityMap, VisibilityStats)> {
    Calculator::new(options)
        .calculate_with_stats(&input.graph, &input.view)
        .context("Failed to calculate upload visibility")
}

/// Commits of the result whose id matches `pattern` (all commits if none)
pub fn filter_commits<'a>(visibility: &'a VisibilityMap, pattern: Option<&str>) -> Result<Vec<&'a str>> {
    match pattern {
        Some(pat) => {
            let re = Regex::new(pat)
                .with_context(|| format!("Invalid regex pattern: {}", pat))?;
            Ok(visibility.commits().filter(|commit| re.is_match(commit)).collect())
        }
        None => Ok(visibility.commits().collect()),
    }
}

/// Builds table rows for the given entries of one commit
pub fn visibility_rows(input: &Input, commit: &str, metas: &[UploadMeta]) -> Vec<VisibilityRow> {
    metas
        .iter()
        .map(|meta| {
            let upload = input.uploads.get(&meta.upload_id);
            VisibilityRow {
                commit: short_commit(commit).to_string(),
                upload: match upload {
                    Some(upload) => format!("#{} @ {}", meta.upload_id, short_commit(&upload.commit)),
                    None => format!("#{}", meta.upload_id),
                },
                root: upload.map(|u| display_root(&u.root)).unwrap_or_else(|| "-".to_string()),
                indexer: upload.map(|u| u.indexer.clone()).unwrap_or_else(|| "-".to_string()),
                distance: meta.distance,
                direction: if meta.distance == 0 {
                    "local".to_string()
                } else if meta.ancestor_visible {
                    "ancestor".to_string()
                } else {
                    "descendant".to_string()
                },
                status: if meta.overwritten { "overwritten" } else { "visible" }.to_string(),
            }
        })
        .collect()
}

/// Renders rows as a rounded table
pub fn render_table(rows: Vec<VisibilityRow>) -> String {
    let mut table = Table::new(rows);
    table.with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Color::FG_BRIGHT_CYAN));
    table.to_string()
}

/// First 8 characters of a commit
pub fn short_commit(commit: &str) -> &str {
    commit.get(..8).unwrap_or(commit)
}

fn display_root(root: &str) -> String {
    if root.is_empty() {
        "(repository root)".to_string()
    } else {
        root.to_string()
    }
}

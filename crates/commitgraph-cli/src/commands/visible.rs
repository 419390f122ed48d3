//! Visible command implementation

use anyhow::Result;
use colored::Colorize;
use commitgraph_core::UploadMeta;
use commitgraph_engine::CalculatorOptions;

use crate::helpers::{calculate, filter_commits, render_table, visibility_rows};
use crate::input::Input;

/// Displays the uploads visible from one or more commits
pub fn cmd_visible(
    input: &Input,
    options: CalculatorOptions,
    commit: Option<String>,
    pattern: Option<String>,
    show_all: bool,
) -> Result<()> {
    let (visibility, _stats) = calculate(input, options)?;

    let commits: Vec<&str> = match commit.as_deref() {
        Some(commit) => {
            if !visibility.contains_commit(commit) {
                eprintln!("{} Commit {} is not part of the graph", "❌".red(), commit.bold());
                std::process::exit(1);
            }
            vec![commit]
        }
        None => filter_commits(&visibility, pattern.as_deref())?,
    };

    let mut rows = Vec::new();
    for commit in &commits {
        let metas: Vec<UploadMeta> = if show_all {
            visibility.get(commit).to_vec()
        } else {
            visibility.visible_at(commit)
        };
        rows.extend(visibility_rows(input, commit, &metas));
    }

    if rows.is_empty() {
        println!("{} No uploads visible from {} commit(s)", "❌".red(), commits.len().to_string().bold());
        return Ok(());
    }

    println!("{}", render_table(rows));
    Ok(())
}

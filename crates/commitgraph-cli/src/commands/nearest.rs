//! Nearest command implementation

use anyhow::Result;
use colored::Colorize;
use commitgraph_engine::CalculatorOptions;

use crate::helpers::{calculate, render_table, short_commit, visibility_rows};
use crate::input::Input;

/// Displays the uploads answering queries at a commit, nearest first
pub fn cmd_nearest(input: &Input, options: CalculatorOptions, commit: String, tip: bool) -> Result<()> {
    let (visibility, _stats) = calculate(input, options)?;

    if !visibility.contains_commit(&commit) {
        eprintln!("{} Commit {} is not part of the graph", "❌".red(), commit.bold());
        std::process::exit(1);
    }

    let metas = if tip {
        visibility.visible_at_tip(&commit, input.view.tokens())
    } else {
        visibility.visible_at(&commit)
    };

    match metas.first() {
        Some(nearest) => {
            println!(
                "\n{} {} {}",
                "📦 Nearest upload for".bright_cyan(),
                short_commit(&commit).bold(),
                format!("#{} ({} away)", nearest.upload_id, nearest.distance).bold()
            );
            println!("{}", render_table(visibility_rows(input, &commit, &metas)));
        }
        None => {
            println!("{} No uploads visible from {}", "❌".red(), commit.bold());
        }
    }

    Ok(())
}

//! View command implementation

use anyhow::{Context, Result};
use clap::ValueEnum;
use colored::Colorize;
use commitgraph_core::CommitGraphView;
use commitgraph_engine::CalculatorOptions;
use std::path::PathBuf;

use crate::helpers::calculate;
use crate::input::Input;

/// Encoding of an exported view
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ViewFormat {
    Bincode,
    Json,
}

/// Writes the packed commit graph view of the full result
pub fn cmd_view(input: &Input, options: CalculatorOptions, output: PathBuf, format: ViewFormat) -> Result<()> {
    let (visibility, stats) = calculate(input, options)?;
    let packed = CommitGraphView::from_visibility(&visibility, input.view.tokens()).to_packed();

    let bytes = match format {
        ViewFormat::Bincode => packed.to_bytes(),
        ViewFormat::Json => packed.to_json().map(String::into_bytes),
    }
    .context("Failed to encode commit graph view")?;

    std::fs::write(&output, &bytes)
        .with_context(|| format!("Failed to write view to {:?}", output))?;

    println!(
        "{} {} entries for {} commits ({} bytes) to {}",
        "✅ Wrote".green(),
        stats.entries.to_string().bold(),
        stats.commits.to_string().bold(),
        bytes.len(),
        output.display()
    );
    Ok(())
}

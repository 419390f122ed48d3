//! Stats command implementation

use anyhow::Result;
use colored::Colorize;
use commitgraph_engine::formatting::{format_duration, format_number};
use commitgraph_engine::CalculatorOptions;

use crate::helpers::calculate;
use crate::input::Input;

/// Displays visibility statistics
pub fn cmd_stats(input: &Input, options: CalculatorOptions) -> Result<()> {
    let (_visibility, stats) = calculate(input, options)?;

    println!("{}", "Visibility Statistics:".bright_cyan().bold());
    println!("  {}: {}", "Commits".bright_yellow(), format_number(stats.commits).bold());
    println!("  {}: {}", "Uploads".bright_yellow(), format_number(input.uploads.len()).bold());
    println!("  {}: {}", "Visible entries".bright_yellow(), format_number(stats.visible()).bold());
    println!("  {}: {}", "Found via ancestors".bright_yellow(), format_number(stats.ancestor_visible).bold());
    println!("  {}: {}", "Overwritten entries".bright_yellow(), format_number(stats.overwritten).bold());
    println!("  {}: {}", "Time".bright_yellow(), format_duration(stats.elapsed_time).bold());
    Ok(())
}

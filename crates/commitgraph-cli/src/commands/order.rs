//! Order command implementation

use anyhow::{Context, Result};
use commitgraph_engine::graph::topological_sort;

use crate::input::Input;

/// Prints the commits of the graph, parents before children
pub fn cmd_order(input: &Input) -> Result<()> {
    let order = topological_sort(&input.graph).context("Failed to order commit graph")?;
    for commit in &order {
        println!("{}", commit);
    }
    log::info!("Ordered {} commits", order.len());
    Ok(())
}

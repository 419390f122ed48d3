//! Commitgraph CLI - Upload visibility over repository history
//!
//! Provides:
//! - Topological ordering of a commit graph
//! - Per-commit tables of visible uploads
//! - Nearest-upload lookups
//! - Export of the compact commit graph view and recalculation of graph
//!   fragments seeded from it

mod commands;
mod helpers;
mod input;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commitgraph_engine::CalculatorOptions;
use std::path::PathBuf;

use commands::{cmd_nearest, cmd_order, cmd_stats, cmd_view, cmd_visible, ViewFormat};
use input::load_input;

#[derive(Parser)]
#[command(name = "commitgraph")]
#[command(about = "Computes which uploads are visible from every commit of a repository", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON file with the commit graph and upload definitions
    #[arg(short, long)]
    input: PathBuf,

    /// Read the commit graph from `git log --pretty='%H %P'` output instead
    #[arg(long)]
    graph_log: Option<PathBuf>,

    /// Exported view whose entries seed the calculation (for graph fragments)
    #[arg(long)]
    seed_view: Option<PathBuf>,

    /// Encoding of the seed view
    #[arg(long, value_enum, default_value = "bincode")]
    seed_format: ViewFormat,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Number of threads (default: number of CPU cores)
    #[arg(short = 'j', long)]
    threads: Option<usize>,

    /// Run both propagation passes on the current thread
    #[arg(long)]
    sequential: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Prints commits parents-first
    Order,

    /// Shows uploads visible from commits
    Visible {
        /// Only this commit
        #[arg(short, long)]
        commit: Option<String>,

        /// Only commits matching this regex
        #[arg(short, long, conflicts_with = "commit")]
        pattern: Option<String>,

        /// Include overwritten uploads
        #[arg(short, long)]
        all: bool,
    },

    /// Shows the nearest uploads for a commit
    Nearest {
        /// Commit to query
        #[arg(short, long)]
        commit: String,

        /// Only uploads found through ancestors (as seen from a branch tip)
        #[arg(long)]
        tip: bool,
    },

    /// Writes the compact commit graph view of the result
    View {
        /// Output file
        #[arg(short, long)]
        output: PathBuf,

        /// Encoding of the output file
        #[arg(short, long, value_enum, default_value = "bincode")]
        format: ViewFormat,
    },

    /// Shows calculation statistics
    Stats,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Configure logger
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(&cli.log_level)
    ).init();

    if let Some(num_threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    let input = load_input(&cli.input, cli.graph_log.as_deref(), cli.seed_view.as_deref(), cli.seed_format)
        .with_context(|| format!("Failed to load input from {:?}", cli.input))?;

    let options = CalculatorOptions { parallel: !cli.sequential };

    match cli.command {
        Commands::Order => {
            cmd_order(&input)?;
        }
        Commands::Visible { commit, pattern, all } => {
            cmd_visible(&input, options, commit, pattern, all)?;
        }
        Commands::Nearest { commit, tip } => {
            cmd_nearest(&input, options, commit, tip)?;
        }
        Commands::View { output, format } => {
            cmd_view(&input, options, output, format)?;
        }
        Commands::Stats => {
            cmd_stats(&input, options)?;
        }
    }

    Ok(())
}

//! Loading of graph and upload definitions

use anyhow::{bail, Context, Result};
use commitgraph_core::{CommitGraphView, Graph, PackedCommitGraphView, Upload, UploadId};
use commitgraph_engine::graph::parse_commit_graph;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::commands::ViewFormat;

/// On-disk input format
///
/// ```json
/// { "graph": { "<commit>": ["<parent>"] },
///   "uploads": [ { "id": 1, "commit": "<commit>", "root": "", "indexer": "lsif-go" } ] }
/// ```
#[derive(Debug, Default, Deserialize)]
struct InputFile {
    #[serde(default)]
    graph: Graph,

    #[serde(default)]
    uploads: Vec<Upload>,
}

/// Graph and uploads ready for the calculator
pub struct Input {
    pub graph: Graph,
    pub view: CommitGraphView,
    pub uploads: HashMap<UploadId, Upload>,
}

/// Reads the JSON input, taking the graph from `git log` output if given
///
/// Entries of a seed view (an exported result) are added to the uploads of
/// the input, so a fragment of the graph can be recalculated.
pub fn load_input(
    path: &Path,
    graph_log: Option<&Path>,
    seed_view: Option<&Path>,
    seed_format: ViewFormat,
) -> Result<Input> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file {:?}", path))?;
    let file: InputFile = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse input file {:?}", path))?;

    let graph = match graph_log {
        Some(log_path) => {
            let output = std::fs::read_to_string(log_path)
                .with_context(|| format!("Failed to read git log output {:?}", log_path))?;
            parse_commit_graph(&output)
                .with_context(|| format!("Failed to parse git log output {:?}", log_path))?
        }
        None => file.graph,
    };

    log::debug!("Loaded {} commits and {} uploads", graph.len(), file.uploads.len());

    let mut uploads = HashMap::with_capacity(file.uploads.len());
    for upload in &file.uploads {
        if let Some(previous) = uploads.insert(upload.id, upload.clone()) {
            bail!(
                "Upload #{} is defined more than once (at {} and {})",
                upload.id,
                previous.commit,
                upload.commit
            );
        }
    }

    let mut view = CommitGraphView::from_uploads(&file.uploads);
    if let Some(seed_path) = seed_view {
        let seed = read_view(seed_path, seed_format)?;
        log::debug!("Seeding from {} commits of {:?}", seed.meta().len(), seed_path);
        view.extend_from(&seed);
    }

    Ok(Input { graph, view, uploads })
}

/// Reads a view written by the `view` command
fn read_view(path: &Path, format: ViewFormat) -> Result<CommitGraphView> {
    let packed = match format {
        ViewFormat::Bincode => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("Failed to read seed view {:?}", path))?;
            PackedCommitGraphView::from_bytes(&bytes)
        }
        ViewFormat::Json => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read seed view {:?}", path))?;
            PackedCommitGraphView::from_json(&json)
        }
    }
    .with_context(|| format!("Failed to decode seed view {:?}", path))?;

    Ok(packed.unpack())
}

//! Main calculator structure

use commitgraph_core::{CommitGraphView, CoreError, Graph, VisibilityMap};
use std::time::Instant;

use crate::graph::reverse_graph;
use crate::stats::VisibilityStats;
use crate::visibility::{ancestor_visibility, combine_visibility, descendant_visibility, Ordering};

/// Calculator configuration
#[derive(Debug, Clone, Copy)]
pub struct CalculatorOptions {
    /// Run the ancestor and descendant passes on the rayon pool
    pub parallel: bool,
}

impl Default for CalculatorOptions {
    fn default() -> Self {
        Self { parallel: true }
    }
}

/// Computes which uploads are visible from every commit of a graph
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    options: CalculatorOptions,
}

impl Calculator {
    /// Creates a new calculator with the given options
    pub fn new(options: CalculatorOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> CalculatorOptions {
        self.options
    }

    /// Calculates visibility of the uploads in `view` over `graph`
    ///
    /// `view` normally holds each upload at its own commit; it may also carry
    /// entries computed earlier over a larger graph, which lets a fragment of
    /// that graph be recomputed on its own. Fails only if `graph` has a cycle.
    pub fn calculate(&self, graph: &Graph, view: &CommitGraphView) -> Result<VisibilityMap, CoreError> {
        self.calculate_with_stats(graph, view).map(|(visibility, _)| visibility)
    }

    /// Same as [`Calculator::calculate`], also returning statistics
    pub fn calculate_with_stats(
        &self,
        graph: &Graph,
        view: &CommitGraphView,
    ) -> Result<(VisibilityMap, VisibilityStats), CoreError> {
        let start_time = Instant::now();

        let ordering = Ordering::new(graph)?;
        let children = reverse_graph(graph);
        log::debug!(
            "Ordered {} commits in {:.2}ms",
            ordering.len(),
            start_time.elapsed().as_secs_f64() * 1000.0
        );

        for commit in view.meta().keys() {
            if ordering.position(commit).is_none() {
                log::debug!("Ignoring uploads of commit {} outside the graph", commit);
            }
        }

        // The passes share no mutable state; join them before combining
        let (ancestors, descendants) = if self.options.parallel {
            rayon::join(
                || ancestor_visibility(&ordering, graph, view),
                || descendant_visibility(&ordering, &children, view),
            )
        } else {
            (
                ancestor_visibility(&ordering, graph, view),
                descendant_visibility(&ordering, &children, view),
            )
        };

        let visibility = combine_visibility(&ordering, ancestors, descendants, view.tokens());
        let stats = VisibilityStats::from_visibility(&visibility, start_time.elapsed());
        log::info!("Visibility calculated: {}", stats);

        Ok((visibility, stats))
    }
}

/// Calculates visibility with default options
pub fn calculate_visible_uploads(graph: &Graph, view: &CommitGraphView) -> Result<VisibilityMap, CoreError> {
    Calculator::default().calculate(graph, view)
}

//! Circular dependency detection
//!
//! Finds every maximal strongly connected component with two or more
//! members using Tarjan's algorithm over the whole graph in one pass.
//! Self-referencing projects form single-member components and are not
//! reported.

use crate::core::{CancellationToken, CycleInfo, ProjectNode, Result};
use crate::graph::{compare_projects, DependencyGraph};
use petgraph::algo::tarjan_scc;
use petgraph::graph::NodeIndex;
use tracing::{debug, info_span};

#[derive(Debug, Clone, Copy, Default)]
pub struct CycleDetector;

impl CycleDetector {
    pub fn new() -> Self {
        Self
    }

    /// Detect cycles in `graph`.
    ///
    /// Ids are assigned 1.. in order of each component's earliest vertex
    /// (graph insertion order), so an unchanged graph always yields the same
    /// ids and membership. Cancellation is checked before the traversal and
    /// again before results are assembled.
    pub fn detect(
        &self,
        graph: &DependencyGraph,
        cancel: &CancellationToken,
    ) -> Result<Vec<CycleInfo>> {
        let _span = info_span!("detect_cycles", projects = graph.project_count()).entered();
        cancel.check()?;

        if graph.is_empty() {
            return Ok(Vec::new());
        }

        let components = tarjan_scc(graph.inner());
        cancel.check()?;

        let cycles = number_components(multi_member_components(components))
            .into_iter()
            .map(|(id, members)| {
                let mut nodes: Vec<ProjectNode> = members
                    .into_iter()
                    .map(|idx| graph.inner()[idx].clone())
                    .collect();
                nodes.sort_by(compare_projects);
                CycleInfo::new(id, nodes)
            })
            .collect::<Vec<_>>();

        debug!("Detected {} cycles", cycles.len());
        Ok(cycles)
    }
}

/// Pure function: keep components that can form a cycle
fn multi_member_components(components: Vec<Vec<NodeIndex>>) -> Vec<Vec<NodeIndex>> {
    components.into_iter().filter(|c| c.len() > 1).collect()
}

/// Pure function: order components by their earliest vertex and assign
/// 1-based ids
fn number_components(mut components: Vec<Vec<NodeIndex>>) -> Vec<(usize, Vec<NodeIndex>)> {
    for component in &mut components {
        component.sort();
    }
    components.sort_by_key(|c| c.first().copied());
    components
        .into_iter()
        .enumerate()
        .map(|(i, c)| (i + 1, c))
        .collect()
}

//! Weak edge identification
//!
//! For every cycle, finds the intra-cycle edges with the minimum coupling
//! weight. Ties are all reported; any of them is an equally valid cut point.

use crate::core::{AnalysisWarning, CancellationToken, CycleInfo, DependencyEdge, Result};
use crate::graph::{compare_edges, DependencyGraph};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::HashSet;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, Default)]
pub struct WeakEdgeIdentifier;

impl WeakEdgeIdentifier {
    pub fn new() -> Self {
        Self
    }

    /// Attach weak edges and their shared weight to each cycle.
    ///
    /// A cycle whose members have no edge between them in `graph` is left
    /// without a result and reported as a warning.
    pub fn identify(
        &self,
        graph: &DependencyGraph,
        cycles: &mut [CycleInfo],
        cancel: &CancellationToken,
    ) -> Result<Vec<AnalysisWarning>> {
        cancel.check()?;
        let mut warnings = Vec::new();

        for cycle in cycles.iter_mut() {
            cancel.check()?;
            let intra = intra_cycle_edges(graph, cycle);
            match weakest(intra) {
                Some((weight, edges)) => {
                    debug!(
                        "Cycle {}: {} weak edge(s) at weight {}",
                        cycle.id,
                        edges.len(),
                        weight
                    );
                    cycle.min_coupling_weight = Some(weight);
                    cycle.weak_edges = Some(edges);
                }
                None => {
                    let warning = AnalysisWarning::CycleWithoutIntraEdges { cycle_id: cycle.id };
                    warn!("{}", warning);
                    cycle.min_coupling_weight = None;
                    cycle.weak_edges = None;
                    warnings.push(warning);
                }
            }
        }

        Ok(warnings)
    }
}

/// Edges whose endpoints are both members of `cycle`, self-references excluded
pub fn intra_cycle_edges(graph: &DependencyGraph, cycle: &CycleInfo) -> Vec<DependencyEdge> {
    let members: HashSet<_> = cycle
        .members
        .iter()
        .filter_map(|m| graph.node_index(m))
        .collect();
    let inner = graph.inner();

    members
        .iter()
        .flat_map(|&idx| inner.edges_directed(idx, Direction::Outgoing))
        .filter(|e| e.source() != e.target() && members.contains(&e.target()))
        .map(|e| DependencyEdge {
            source: inner[e.source()].clone(),
            target: inner[e.target()].clone(),
            kind: e.weight().kind,
            coupling_weight: e.weight().coupling_weight,
        })
        .collect()
}

/// Pure function: minimum weight and every edge carrying it, in stable order
pub fn weakest(edges: Vec<DependencyEdge>) -> Option<(u32, Vec<DependencyEdge>)> {
    let min = edges.iter().map(|e| e.coupling_weight).min()?;
    let mut tied: Vec<DependencyEdge> = edges
        .into_iter()
        .filter(|e| e.coupling_weight == min)
        .collect();
    tied.sort_by(compare_edges);
    Some((min, tied))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ProjectNode, ReferenceKind};
    use crate::cycles::CycleDetector;

    fn node(name: &str) -> ProjectNode {
        ProjectNode::new(name, format!("/{}", name)).unwrap()
    }

    fn weighted_graph(edges: &[(&str, &str, u32)]) -> DependencyGraph {
        let mut graph = DependencyGraph::new();
        for (from, to, weight) in edges {
            graph.add_project(node(from));
            graph.add_project(node(to));
            graph
                .add_dependency(&node(from), &node(to), ReferenceKind::Project, *weight)
                .unwrap();
        }
        graph
    }

    fn analyze(graph: &DependencyGraph) -> (Vec<CycleInfo>, Vec<AnalysisWarning>) {
        let token = CancellationToken::new();
        let mut cycles = CycleDetector::new().detect(graph, &token).unwrap();
        let warnings = WeakEdgeIdentifier::new()
            .identify(graph, &mut cycles, &token)
            .unwrap();
        (cycles, warnings)
    }

    #[test]
    fn test_two_cycle_picks_lighter_edge() {
        let (cycles, warnings) = analyze(&weighted_graph(&[("A", "B", 5), ("B", "A", 15)]));

        assert!(warnings.is_empty());
        let weak = cycles[0].weak_edges.as_ref().unwrap();
        assert_eq!(cycles[0].min_coupling_weight, Some(5));
        assert_eq!(weak.len(), 1);
        assert_eq!(weak[0].describe(), "A → B");
    }

    #[test]
    fn test_all_tied_edges_are_reported() {
        let (cycles, _) = analyze(&weighted_graph(&[
            ("A", "B", 7),
            ("B", "C", 7),
            ("C", "A", 7),
        ]));

        let weak = cycles[0].weak_edges.as_ref().unwrap();
        let described: Vec<String> = weak.iter().map(|e| e.describe()).collect();
        assert_eq!(described, vec!["A → B", "B → C", "C → A"]);
    }

    #[test]
    fn test_edges_leaving_the_cycle_are_ignored() {
        let (cycles, _) = analyze(&weighted_graph(&[
            ("A", "B", 10),
            ("B", "A", 12),
            ("B", "Outside", 1),
            ("A", "A", 0),
        ]));

        assert_eq!(cycles[0].min_coupling_weight, Some(10));
        assert_eq!(cycles[0].weak_edges.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn test_cycle_without_edges_is_skipped_with_warning() {
        let graph = weighted_graph(&[("A", "B", 1)]);
        let mut cycles = vec![CycleInfo::new(1, vec![node("A"), node("Ghost")])];
        let warnings = WeakEdgeIdentifier::new()
            .identify(&graph, &mut cycles, &CancellationToken::new())
            .unwrap();

        assert_eq!(
            warnings,
            vec![AnalysisWarning::CycleWithoutIntraEdges { cycle_id: 1 }]
        );
        assert!(cycles[0].weak_edges.is_none());
        assert!(cycles[0].min_coupling_weight.is_none());
    }

    #[test]
    fn test_weakest_of_nothing() {
        assert!(weakest(Vec::new()).is_none());
    }
}

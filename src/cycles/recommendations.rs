//! Cycle-breaking recommendations
//!
//! Flattens every (cycle, weak edge) pair into one globally ranked list.
//! Order: ascending coupling weight, then descending cycle size, then cycle
//! id and edge endpoints so the ranking is a total order.

use crate::config::RecommendationConfig;
use crate::core::{CancellationToken, CycleBreakingSuggestion, CycleInfo, DependencyEdge, Result};
use crate::graph::compare_edges;
use std::cmp::Ordering;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct RecommendationGenerator {
    large_cycle_threshold: usize,
}

impl Default for RecommendationGenerator {
    fn default() -> Self {
        Self::new(&RecommendationConfig::default())
    }
}

impl RecommendationGenerator {
    pub fn new(config: &RecommendationConfig) -> Self {
        Self {
            large_cycle_threshold: config.large_cycle_threshold,
        }
    }

    /// Rank one suggestion per weak edge across all cycles.
    ///
    /// Cycles without weak-edge results contribute nothing. The full list is
    /// returned; taking a top-N slice is up to the consumer.
    pub fn generate(
        &self,
        cycles: &[CycleInfo],
        cancel: &CancellationToken,
    ) -> Result<Vec<CycleBreakingSuggestion>> {
        cancel.check()?;

        let mut candidates: Vec<(&CycleInfo, &DependencyEdge)> = cycles
            .iter()
            .flat_map(|cycle| {
                cycle
                    .weak_edges
                    .iter()
                    .flatten()
                    .map(move |edge| (cycle, edge))
            })
            .collect();
        candidates.sort_by(|a, b| compare_candidates(a, b));

        cancel.check()?;

        let suggestions: Vec<CycleBreakingSuggestion> = candidates
            .into_iter()
            .enumerate()
            .map(|(i, (cycle, edge))| CycleBreakingSuggestion {
                cycle_id: cycle.id,
                cycle_size: cycle.size(),
                edge: edge.clone(),
                rank: i + 1,
                rationale: self.rationale(cycle.size(), edge),
            })
            .collect();

        debug!(
            "Generated {} cycle-breaking suggestions from {} cycles",
            suggestions.len(),
            cycles.len()
        );
        Ok(suggestions)
    }

    pub fn is_large_cycle(&self, cycle_size: usize) -> bool {
        cycle_size >= self.large_cycle_threshold
    }

    /// Human-readable reason for breaking `edge`
    pub fn rationale(&self, cycle_size: usize, edge: &DependencyEdge) -> String {
        let calls = method_calls(edge.coupling_weight);
        if self.is_large_cycle(cycle_size) {
            format!(
                "CRITICAL: breaks a large cycle of {} projects; removing {} requires refactoring only {}",
                cycle_size,
                edge.describe(),
                calls
            )
        } else {
            format!(
                "Breaks a cycle of {} projects; removing {} requires refactoring {}",
                cycle_size,
                edge.describe(),
                calls
            )
        }
    }
}

/// Pure function: "1 method call" / "N method calls"
pub fn method_calls(count: u32) -> String {
    if count == 1 {
        "1 method call".to_string()
    } else {
        format!("{} method calls", count)
    }
}

fn compare_candidates(
    a: &(&CycleInfo, &DependencyEdge),
    b: &(&CycleInfo, &DependencyEdge),
) -> Ordering {
    a.1.coupling_weight
        .cmp(&b.1.coupling_weight)
        .then_with(|| b.0.size().cmp(&a.0.size()))
        .then_with(|| a.0.id.cmp(&b.0.id))
        .then_with(|| compare_edges(a.1, b.1))
}

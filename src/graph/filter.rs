//! Framework noise filtering.
//!
//! Removes edges whose target name matches a block pattern unless it also
//! matches an allow pattern. Patterns are either an exact name or a prefix
//! ending in `*`, compared case-insensitively. Vertices are never removed.

use super::DependencyGraph;
use crate::config::FilterConfig;
use crate::core::Result;
use tracing::debug;

/// Compiled case-insensitive name patterns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternSet {
    patterns: Vec<NamePattern>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum NamePattern {
    Exact(String),
    Prefix(String),
}

impl NamePattern {
    fn parse(raw: &str) -> Self {
        let lowered = raw.trim().to_lowercase();
        match lowered.strip_suffix('*') {
            Some(prefix) => Self::Prefix(prefix.to_string()),
            None => Self::Exact(lowered),
        }
    }

    fn matches(&self, lowered_name: &str) -> bool {
        match self {
            Self::Exact(exact) => lowered_name == exact,
            Self::Prefix(prefix) => lowered_name.starts_with(prefix.as_str()),
        }
    }
}

impl PatternSet {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Self {
        Self {
            patterns: patterns
                .iter()
                .map(|p| p.as_ref())
                .filter(|p| !p.trim().is_empty())
                .map(NamePattern::parse)
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn matches(&self, name: &str) -> bool {
        let lowered = name.to_lowercase();
        self.patterns.iter().any(|p| p.matches(&lowered))
    }
}

/// Filtered graph and the number of edges that were dropped
#[derive(Debug, Clone)]
pub struct FilterOutcome {
    pub graph: DependencyGraph,
    pub removed_edges: usize,
}

#[derive(Debug, Clone, Default)]
pub struct FrameworkFilter {
    block: PatternSet,
    allow: PatternSet,
}

impl FrameworkFilter {
    pub fn new(config: &FilterConfig) -> Self {
        Self {
            block: PatternSet::new(&config.block),
            allow: PatternSet::new(&config.allow),
        }
    }

    /// Filter that removes nothing
    pub fn disabled() -> Self {
        Self::default()
    }

    /// True when an edge to `target_name` should be dropped.
    /// The allow list is checked first and always wins.
    pub fn is_blocked(&self, target_name: &str) -> bool {
        if self.allow.matches(target_name) {
            return false;
        }
        self.block.matches(target_name)
    }

    /// Produce a new graph with the same vertices and the surviving edges
    pub fn apply(&self, graph: &DependencyGraph) -> Result<FilterOutcome> {
        if self.block.is_empty() {
            return Ok(FilterOutcome {
                graph: graph.clone(),
                removed_edges: 0,
            });
        }

        let mut filtered = graph.without_edges();
        let mut removed_edges = 0;
        for edge in graph.edges() {
            if self.is_blocked(edge.target.name()) {
                debug!("Filtered framework dependency {}", edge.describe());
                removed_edges += 1;
                continue;
            }
            filtered.add_dependency(&edge.source, &edge.target, edge.kind, edge.coupling_weight)?;
        }

        debug!(
            "Framework filter removed {} of {} edges",
            removed_edges,
            graph.dependency_count()
        );
        Ok(FilterOutcome {
            graph: filtered,
            removed_edges,
        })
    }
}

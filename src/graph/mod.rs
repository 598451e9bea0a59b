//! Project dependency graph.
//!
//! A directed graph of [`ProjectNode`] vertices keyed by canonical path. Any
//! number of raw references between the same ordered pair collapse into one
//! edge carrying the maximum coupling weight, which is what cycle detection
//! and coupling metrics operate on.

pub mod builder;
pub mod filter;

pub use builder::{BuildOutcome, GraphBuilder};
pub use filter::{FilterOutcome, FrameworkFilter, PatternSet};

use crate::core::{DependencyEdge, Error, ProjectNode, ReferenceKind, Result};
use petgraph::graph::{DiGraph, EdgeReference, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::HashMap;

/// Attributes stored on a graph edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeAttributes {
    pub kind: ReferenceKind,
    pub coupling_weight: u32,
}

/// Dependency graph with outgoing and incoming edge lookup
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    graph: DiGraph<ProjectNode, EdgeAttributes>,
    index: HashMap<String, NodeIndex>,
    /// Lowercased display name -> vertices carrying it
    names: HashMap<String, Vec<NodeIndex>>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a project. Returns `false` if a project with the same canonical
    /// path is already present; the existing vertex is left untouched.
    pub fn add_project(&mut self, project: ProjectNode) -> bool {
        if self.index.contains_key(project.key()) {
            return false;
        }
        let key = project.key().to_string();
        let name = project.name().to_lowercase();
        let idx = self.graph.add_node(project);
        self.index.insert(key, idx);
        self.names.entry(name).or_default().push(idx);
        true
    }

    /// Add a dependency between two existing projects.
    ///
    /// Returns `Ok(true)` when a new edge was created. A repeated declaration
    /// of the same ordered pair merges into the existing edge (maximum weight,
    /// project kind wins) and returns `Ok(false)`.
    pub fn add_dependency(
        &mut self,
        source: &ProjectNode,
        target: &ProjectNode,
        kind: ReferenceKind,
        coupling_weight: u32,
    ) -> Result<bool> {
        let from = self.require_index(source)?;
        let to = self.require_index(target)?;

        if let Some(existing) = self.graph.find_edge(from, to) {
            let attrs = &mut self.graph[existing];
            attrs.coupling_weight = attrs.coupling_weight.max(coupling_weight);
            attrs.kind = attrs.kind.merge(kind);
            return Ok(false);
        }

        self.graph.add_edge(
            from,
            to,
            EdgeAttributes {
                kind,
                coupling_weight,
            },
        );
        Ok(true)
    }

    pub fn contains(&self, project: &ProjectNode) -> bool {
        self.index.contains_key(project.key())
    }

    /// Look up a project by canonical path (case-insensitive)
    pub fn find(&self, path: &str) -> Option<&ProjectNode> {
        self.index
            .get(&crate::core::canonical_key(path))
            .map(|&idx| &self.graph[idx])
    }

    /// All projects whose display name matches case-insensitively
    pub fn find_by_name(&self, name: &str) -> Vec<&ProjectNode> {
        self.names
            .get(&name.to_lowercase())
            .map(|indices| indices.iter().map(|&idx| &self.graph[idx]).collect())
            .unwrap_or_default()
    }

    pub fn project_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn dependency_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Projects in insertion order
    pub fn projects(&self) -> impl Iterator<Item = &ProjectNode> {
        self.graph.node_weights()
    }

    /// Projects sorted by display name, then canonical path
    pub fn sorted_projects(&self) -> Vec<&ProjectNode> {
        let mut projects: Vec<&ProjectNode> = self.graph.node_weights().collect();
        projects.sort_by(|a, b| compare_projects(a, b));
        projects
    }

    /// Edges in insertion order
    pub fn edges(&self) -> Vec<DependencyEdge> {
        self.graph
            .edge_references()
            .map(|e| self.to_dependency_edge(e))
            .collect()
    }

    /// Edges sorted by source name, then target name
    pub fn sorted_edges(&self) -> Vec<DependencyEdge> {
        let mut edges = self.edges();
        edges.sort_by(compare_edges);
        edges
    }

    /// Edge for an ordered pair, if declared
    pub fn edge_between(
        &self,
        source: &ProjectNode,
        target: &ProjectNode,
    ) -> Option<DependencyEdge> {
        let from = *self.index.get(source.key())?;
        let to = *self.index.get(target.key())?;
        let edge = self.graph.find_edge(from, to)?;
        let attrs = self.graph[edge];
        Some(DependencyEdge {
            source: self.graph[from].clone(),
            target: self.graph[to].clone(),
            kind: attrs.kind,
            coupling_weight: attrs.coupling_weight,
        })
    }

    /// Dependencies declared by `project`
    pub fn outgoing(&self, project: &ProjectNode) -> Result<Vec<DependencyEdge>> {
        self.directed_edges(project, Direction::Outgoing)
    }

    /// Dependencies pointing at `project`
    pub fn incoming(&self, project: &ProjectNode) -> Result<Vec<DependencyEdge>> {
        self.directed_edges(project, Direction::Incoming)
    }

    /// True when `project` depends on nothing
    pub fn has_no_outgoing(&self, project: &ProjectNode) -> Result<bool> {
        let idx = self.require_index(project)?;
        Ok(self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .next()
            .is_none())
    }

    /// True when nothing depends on `project`
    pub fn has_no_incoming(&self, project: &ProjectNode) -> Result<bool> {
        let idx = self.require_index(project)?;
        Ok(self
            .graph
            .edges_directed(idx, Direction::Incoming)
            .next()
            .is_none())
    }

    /// Projects with neither dependencies nor dependents, sorted by name
    pub fn orphans(&self) -> Vec<&ProjectNode> {
        let mut orphans: Vec<&ProjectNode> = self
            .graph
            .node_indices()
            .filter(|&idx| {
                self.graph
                    .edges_directed(idx, Direction::Outgoing)
                    .next()
                    .is_none()
                    && self
                        .graph
                        .edges_directed(idx, Direction::Incoming)
                        .next()
                        .is_none()
            })
            .map(|idx| &self.graph[idx])
            .collect();
        orphans.sort_by(|a, b| compare_projects(a, b));
        orphans
    }

    /// Same projects, no edges
    pub(crate) fn without_edges(&self) -> DependencyGraph {
        let mut copy = DependencyGraph::new();
        for project in self.graph.node_weights() {
            copy.add_project(project.clone());
        }
        copy
    }

    pub(crate) fn inner(&self) -> &DiGraph<ProjectNode, EdgeAttributes> {
        &self.graph
    }

    pub(crate) fn node_index(&self, project: &ProjectNode) -> Option<NodeIndex> {
        self.index.get(project.key()).copied()
    }

    fn require_index(&self, project: &ProjectNode) -> Result<NodeIndex> {
        self.node_index(project)
            .ok_or_else(|| Error::unknown_project(project.path()))
    }

    fn directed_edges(
        &self,
        project: &ProjectNode,
        direction: Direction,
    ) -> Result<Vec<DependencyEdge>> {
        let idx = self.require_index(project)?;
        Ok(self
            .graph
            .edges_directed(idx, direction)
            .map(|e| self.to_dependency_edge(e))
            .collect())
    }

    fn to_dependency_edge(&self, edge: EdgeReference<'_, EdgeAttributes>) -> DependencyEdge {
        DependencyEdge {
            source: self.graph[edge.source()].clone(),
            target: self.graph[edge.target()].clone(),
            kind: edge.weight().kind,
            coupling_weight: edge.weight().coupling_weight,
        }
    }
}

/// Pure function: stable project ordering (name, then canonical path)
pub fn compare_projects(a: &ProjectNode, b: &ProjectNode) -> std::cmp::Ordering {
    a.name()
        .to_lowercase()
        .cmp(&b.name().to_lowercase())
        .then_with(|| a.name().cmp(b.name()))
        .then_with(|| a.key().cmp(b.key()))
}

/// Pure function: stable edge ordering (source, then target)
pub fn compare_edges(a: &DependencyEdge, b: &DependencyEdge) -> std::cmp::Ordering {
    compare_projects(&a.source, &b.source).then_with(|| compare_projects(&a.target, &b.target))
}

//! Domain types shared by every analysis stage.

use crate::core::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A project participating in the dependency graph.
///
/// Identity is the canonical path compared case-insensitively. The display
/// name never takes part in equality or hashing, so two projects that share
/// a name but live at different paths stay distinct vertices.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectNode {
    name: String,
    path: String,
    platform: String,
    collection: String,
    #[serde(skip)]
    key: String,
}

impl ProjectNode {
    /// Create a node, rejecting an empty name or canonical path
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let path = path.into();
        if name.trim().is_empty() {
            return Err(Error::invalid_input(format!(
                "project at '{}' has an empty name",
                path
            )));
        }
        if path.trim().is_empty() {
            return Err(Error::invalid_input(format!(
                "project '{}' has an empty canonical path",
                name
            )));
        }
        let key = canonical_key(&path);
        Ok(Self {
            name,
            path,
            platform: String::new(),
            collection: String::new(),
            key,
        })
    }

    /// Builder pattern: set the target platform/version tag
    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = platform.into();
        self
    }

    /// Builder pattern: set the owning collection (solution) name
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn platform(&self) -> &str {
        &self.platform
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Lower-cased canonical path used as the identity key
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl PartialEq for ProjectNode {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for ProjectNode {}

impl Hash for ProjectNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Display for ProjectNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Pure function: identity key of a canonical path
pub fn canonical_key(path: &str) -> String {
    path.trim().to_lowercase()
}

/// How a dependency was declared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceKind {
    /// Reference to another project of a collection
    #[default]
    Project,
    /// Reference to an external compiled binary
    Assembly,
}

impl ReferenceKind {
    /// Kind kept when two declarations of the same pair disagree
    pub fn merge(self, other: ReferenceKind) -> ReferenceKind {
        if self == ReferenceKind::Project || other == ReferenceKind::Project {
            ReferenceKind::Project
        } else {
            ReferenceKind::Assembly
        }
    }
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Project => write!(f, "Project"),
            Self::Assembly => write!(f, "Assembly"),
        }
    }
}

/// Coupling classification derived from a coupling weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum CouplingStrength {
    /// 1-5 method calls
    Weak,
    /// 6-20 method calls
    Medium,
    /// 21 or more method calls
    Strong,
}

impl CouplingStrength {
    /// Pure function: classify a coupling weight into its band
    pub fn from_weight(weight: u32) -> Self {
        match weight {
            0..=5 => Self::Weak,
            6..=20 => Self::Medium,
            _ => Self::Strong,
        }
    }
}

impl fmt::Display for CouplingStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weak => write!(f, "weak"),
            Self::Medium => write!(f, "medium"),
            Self::Strong => write!(f, "strong"),
        }
    }
}

/// Coupling weight used when no semantic call count is available
pub const DEFAULT_COUPLING_WEIGHT: u32 = 1;

/// A directed dependency `source -> target`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyEdge {
    pub source: ProjectNode,
    pub target: ProjectNode,
    pub kind: ReferenceKind,
    pub coupling_weight: u32,
}

impl DependencyEdge {
    pub fn strength(&self) -> CouplingStrength {
        CouplingStrength::from_weight(self.coupling_weight)
    }

    /// True iff both endpoints belong to different, non-empty collections
    pub fn is_cross_collection(&self) -> bool {
        let source = self.source.collection();
        let target = self.target.collection();
        !source.is_empty() && !target.is_empty() && source != target
    }

    pub fn is_self_reference(&self) -> bool {
        self.source == self.target
    }

    /// Same ordered endpoint pair, ignoring kind and weight
    pub fn connects(&self, source: &ProjectNode, target: &ProjectNode) -> bool {
        &self.source == source && &self.target == target
    }

    /// "source → target" using display names
    pub fn describe(&self) -> String {
        format!("{} → {}", self.source.name(), self.target.name())
    }
}

/// One strongly connected component with two or more members
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleInfo {
    /// 1-based id assigned in discovery order
    pub id: usize,
    /// Members sorted by display name, then canonical path
    pub members: Vec<ProjectNode>,
    /// Weakest intra-cycle edges; `None` until identified or when skipped
    pub weak_edges: Option<Vec<DependencyEdge>>,
    /// Coupling weight shared by every weak edge
    pub min_coupling_weight: Option<u32>,
}

impl CycleInfo {
    pub fn new(id: usize, members: Vec<ProjectNode>) -> Self {
        Self {
            id,
            members,
            weak_edges: None,
            min_coupling_weight: None,
        }
    }

    pub fn size(&self) -> usize {
        self.members.len()
    }

    pub fn contains(&self, node: &ProjectNode) -> bool {
        self.members.iter().any(|m| m == node)
    }

    pub fn member_names(&self) -> Vec<&str> {
        self.members.iter().map(|m| m.name()).collect()
    }
}

/// A recommendation to remove one edge to weaken a cycle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleBreakingSuggestion {
    pub cycle_id: usize,
    pub cycle_size: usize,
    pub edge: DependencyEdge,
    /// Global rank, 1 = most recommended
    pub rank: usize,
    pub rationale: String,
}

impl CycleBreakingSuggestion {
    pub fn coupling_weight(&self) -> u32 {
        self.edge.coupling_weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(name: &str, path: &str) -> ProjectNode {
        ProjectNode::new(name, path).unwrap()
    }

    #[test]
    fn test_node_equality_uses_path_case_insensitively() {
        let a = node("Core", "C:/src/Core/Core.csproj");
        let b = node("SomethingElse", "c:/SRC/core/core.CSPROJ");
        assert_eq!(a, b);
    }

    #[test]
    fn test_node_equality_ignores_display_name() {
        let a = node("Core", "/a/Core.csproj");
        let b = node("Core", "/b/Core.csproj");
        assert_ne!(a, b);
    }

    #[test]
    fn test_node_rejects_empty_identity() {
        assert!(ProjectNode::new("Core", "").is_err());
        assert!(ProjectNode::new("  ", "/a/Core.csproj").is_err());
    }

    #[test]
    fn test_coupling_strength_bands() {
        assert_eq!(CouplingStrength::from_weight(1), CouplingStrength::Weak);
        assert_eq!(CouplingStrength::from_weight(5), CouplingStrength::Weak);
        assert_eq!(CouplingStrength::from_weight(6), CouplingStrength::Medium);
        assert_eq!(CouplingStrength::from_weight(20), CouplingStrength::Medium);
        assert_eq!(CouplingStrength::from_weight(21), CouplingStrength::Strong);
    }

    #[test]
    fn test_cross_collection_requires_both_collections() {
        let a = node("A", "/a").with_collection("Sales");
        let b = node("B", "/b").with_collection("Billing");
        let ext = node("System.Core", "System.Core");

        let cross = DependencyEdge {
            source: a.clone(),
            target: b,
            kind: ReferenceKind::Project,
            coupling_weight: 1,
        };
        let to_external = DependencyEdge {
            source: a,
            target: ext,
            kind: ReferenceKind::Assembly,
            coupling_weight: 1,
        };

        assert!(cross.is_cross_collection());
        assert!(!to_external.is_cross_collection());
    }

    #[test]
    fn test_reference_kind_merge_prefers_project() {
        assert_eq!(
            ReferenceKind::Assembly.merge(ReferenceKind::Project),
            ReferenceKind::Project
        );
        assert_eq!(
            ReferenceKind::Assembly.merge(ReferenceKind::Assembly),
            ReferenceKind::Assembly
        );
    }
}

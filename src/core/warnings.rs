//! Data-integrity warnings.
//!
//! These never abort an analysis: the offending item is skipped and the
//! warning travels with the (still valid) primary result.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisWarning {
    /// A declared reference whose target is not a modeled project
    UnknownReference { source: String, target: String },
    /// A second project record with an already-seen canonical path
    DuplicateProject { path: String },
    /// A cycle with no edge between two of its members in the edge index
    CycleWithoutIntraEdges { cycle_id: usize },
}

impl fmt::Display for AnalysisWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownReference { source, target } => write!(
                f,
                "{} references unknown project '{}'; reference skipped",
                source, target
            ),
            Self::DuplicateProject { path } => {
                write!(f, "duplicate project path '{}'; later record skipped", path)
            }
            Self::CycleWithoutIntraEdges { cycle_id } => write!(
                f,
                "cycle {} has no intra-cycle edges; no weak edge reported",
                cycle_id
            ),
        }
    }
}

pub mod cancellation;
pub mod errors;
pub mod types;
pub mod warnings;

pub use cancellation::CancellationToken;
pub use errors::{Error, Result};
pub use types::{
    canonical_key, CouplingStrength, CycleBreakingSuggestion, CycleInfo, DependencyEdge,
    ProjectNode, ReferenceKind, DEFAULT_COUPLING_WEIGHT,
};
pub use warnings::AnalysisWarning;

//! Cycle analysis: detection, weak edges and break-point recommendations.

pub mod detector;
pub mod recommendations;
pub mod weak_edges;

pub use detector::CycleDetector;
pub use recommendations::{method_calls, RecommendationGenerator};
pub use weak_edges::{intra_cycle_edges, weakest, WeakEdgeIdentifier};

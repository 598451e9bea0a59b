// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod cycles;
pub mod graph;
pub mod io;
pub mod pipeline;
pub mod scoring;

// Re-export commonly used types
pub use crate::core::{
    AnalysisWarning, CancellationToken, CouplingStrength, CycleBreakingSuggestion, CycleInfo,
    DependencyEdge, Error, ProjectNode, ReferenceKind, Result,
};

pub use crate::config::{load_config, DepmapConfig, ScoringWeights};

pub use crate::graph::{DependencyGraph, FrameworkFilter, GraphBuilder, PatternSet};

pub use crate::cycles::{CycleDetector, RecommendationGenerator, WeakEdgeIdentifier};

pub use crate::scoring::{ExtractionScore, ExtractionScorer};

pub use crate::io::dot::DotSerializer;
pub use crate::io::input::ProjectDataset;

pub use crate::pipeline::{AnalysisPipeline, AnalysisReport, AnalysisSummary};

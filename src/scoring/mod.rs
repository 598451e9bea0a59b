pub mod extraction;
pub mod metrics;

pub use extraction::{
    compare_scores, weighted_score, ExtractionScore, ExtractionScorer, ProjectMetrics,
};
pub use metrics::{
    classify_platform, collect_project_metrics, coupling_loads, normalize, tech_debt_score,
    PlatformGeneration,
};

use serde::{Deserialize, Serialize};

use super::display::VisualizationConfig;
use super::filter::FilterConfig;
use super::scoring::ScoringWeights;
use super::thresholds::RecommendationConfig;

/// Root configuration structure for depmap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DepmapConfig {
    /// Extraction scoring weights
    #[serde(default)]
    pub scoring: Option<ScoringWeights>,

    /// Framework noise filter
    #[serde(default)]
    pub filter: Option<FilterConfig>,

    /// Cycle-breaking recommendation settings
    #[serde(default)]
    pub recommendations: Option<RecommendationConfig>,

    /// Graph visualization settings
    #[serde(default)]
    pub visualization: Option<VisualizationConfig>,
}

impl DepmapConfig {
    pub fn scoring_weights(&self) -> ScoringWeights {
        self.scoring.unwrap_or_default()
    }

    pub fn filter(&self) -> FilterConfig {
        self.filter.clone().unwrap_or_default()
    }

    pub fn recommendations(&self) -> RecommendationConfig {
        self.recommendations.clone().unwrap_or_default()
    }

    pub fn visualization(&self) -> VisualizationConfig {
        self.visualization.clone().unwrap_or_default()
    }

    /// Fully populated configuration, as written by `depmap init`
    pub fn with_all_defaults() -> Self {
        Self {
            scoring: Some(ScoringWeights::default()),
            filter: Some(FilterConfig::default()),
            recommendations: Some(RecommendationConfig::default()),
            visualization: Some(VisualizationConfig::default()),
        }
    }
}

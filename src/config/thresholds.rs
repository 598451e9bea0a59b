use serde::{Deserialize, Serialize};

/// Cycle-breaking recommendation thresholds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationConfig {
    /// Cycles with at least this many members are flagged as critical
    #[serde(default = "default_large_cycle_threshold")]
    pub large_cycle_threshold: usize,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            large_cycle_threshold: default_large_cycle_threshold(),
        }
    }
}

impl RecommendationConfig {
    pub fn validation_errors(&self) -> Vec<String> {
        if self.large_cycle_threshold < 2 {
            vec![format!(
                "recommendations.large_cycle_threshold must be at least 2, got {}",
                self.large_cycle_threshold
            )]
        } else {
            Vec::new()
        }
    }
}

fn default_large_cycle_threshold() -> usize {
    8
}

use serde::{Deserialize, Serialize};

/// Layout direction passed through to the graph renderer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum RankDirection {
    /// Left to right
    #[default]
    LR,
    /// Top to bottom
    TB,
}

impl RankDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LR => "LR",
            Self::TB => "TB",
        }
    }
}

/// Visualization configuration for graph output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualizationConfig {
    /// How many top-ranked break points are highlighted (default: 10)
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Append "Score: N" to node labels when scores are available
    #[serde(default = "default_show_scores")]
    pub show_scores: bool,

    #[serde(default)]
    pub rank_direction: RankDirection,
}

impl Default for VisualizationConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            show_scores: default_show_scores(),
            rank_direction: RankDirection::default(),
        }
    }
}

fn default_top_n() -> usize {
    10
}

fn default_show_scores() -> bool {
    true
}

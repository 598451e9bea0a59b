//! Graphviz DOT export of the dependency graph.
//!
//! Nodes are colored per collection, or by an extraction-difficulty heat
//! map when scores are supplied. Edge colors follow a fixed precedence:
//! recommended break point, then cycle edge, then cross-collection edge,
//! then the default. Vertices and edges are emitted in a stable sorted
//! order so identical input always produces identical text.

use crate::config::VisualizationConfig;
use crate::core::{CycleBreakingSuggestion, CycleInfo, DependencyEdge, ProjectNode};
use crate::graph::DependencyGraph;
use crate::scoring::ExtractionScore;
use std::collections::HashMap;

const NODE_PALETTE: [&str; 10] = [
    "#aec7e8", "#ffbb78", "#98df8a", "#ff9896", "#c5b0d5", "#c49c94", "#f7b6d2", "#dbdb8d",
    "#9edae5", "#d9d9d9",
];

const EDGE_PALETTE: [&str; 8] = [
    "#1f77b4", "#2ca02c", "#9467bd", "#8c564b", "#e377c2", "#17becf", "#bcbd22", "#393b79",
];

const EXTERNAL_NODE_COLOR: &str = "#f5f5f5";
const BREAK_EDGE_COLOR: &str = "#d62728";
const CYCLE_EDGE_COLOR: &str = "#ff7f0e";
const DEFAULT_EDGE_COLOR: &str = "#7f7f7f";

/// Difficulty band of an extraction score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeatBand {
    /// 0-33
    Easy,
    /// 34-66
    Medium,
    /// 67-100
    Hard,
}

impl HeatBand {
    /// Pure function: band of a score, using the score rounded to an integer
    pub fn from_score(score: f64) -> Self {
        match score.round() as i64 {
            i64::MIN..=33 => Self::Easy,
            34..=66 => Self::Medium,
            _ => Self::Hard,
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::Easy => "#8fd694",
            Self::Medium => "#f7e463",
            Self::Hard => "#f08080",
        }
    }
}

/// Which rule decided an edge's color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeStyle {
    SuggestedBreak { rank: usize },
    Cycle,
    CrossCollection,
    Default,
}

/// Pure function: escape text for a DOT quoted string (backslash, then quote)
pub fn escape_dot(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Pure function: order-independent character-additive hash
pub fn additive_hash(text: &str) -> u32 {
    text.chars().fold(0u32, |acc, c| acc.wrapping_add(c as u32))
}

/// Pure function: stable fill color of a collection
pub fn collection_color(collection: &str) -> &'static str {
    if collection.is_empty() {
        return EXTERNAL_NODE_COLOR;
    }
    NODE_PALETTE[additive_hash(collection) as usize % NODE_PALETTE.len()]
}

/// Pure function: stable color of an edge between two collections
pub fn collection_pair_color(source: &str, target: &str) -> &'static str {
    let pair = format!("{}->{}", source, target);
    EDGE_PALETTE[additive_hash(&pair) as usize % EDGE_PALETTE.len()]
}

#[derive(Debug, Clone, Default)]
pub struct DotSerializer {
    config: VisualizationConfig,
}

impl DotSerializer {
    pub fn new(config: VisualizationConfig) -> Self {
        Self { config }
    }

    /// Serialize `graph` with cycle, break-point and optional score overlays
    pub fn serialize(
        &self,
        graph: &DependencyGraph,
        cycles: &[CycleInfo],
        suggestions: &[CycleBreakingSuggestion],
        scores: Option<&[ExtractionScore]>,
    ) -> String {
        let overlay = Overlay::new(cycles, suggestions, scores, self.config.top_n);

        let mut dot = String::new();
        dot.push_str("digraph dependencies {\n");
        dot.push_str(&format!(
            "  rankdir={};\n",
            self.config.rank_direction.as_str()
        ));
        dot.push_str(
            "  node [shape=box, style=\"rounded,filled\", fontname=\"Helvetica\", fontsize=10];\n",
        );
        dot.push_str("  edge [fontname=\"Helvetica\", fontsize=9];\n\n");

        for project in graph.sorted_projects() {
            dot.push_str(&self.node_line(project, &overlay));
        }
        if graph.dependency_count() > 0 {
            dot.push('\n');
        }
        for edge in graph.sorted_edges() {
            dot.push_str(&edge_line(&edge, overlay.edge_style(&edge)));
        }

        dot.push_str("}\n");
        dot
    }

    fn node_line(&self, project: &ProjectNode, overlay: &Overlay<'_>) -> String {
        let mut label = escape_dot(project.name());
        let fill = match overlay.score_of(project) {
            Some(score) => {
                if self.config.show_scores {
                    label.push_str(&format!("\\nScore: {}", score.rounded()));
                }
                HeatBand::from_score(score.final_score).color()
            }
            None if overlay.has_scores => EXTERNAL_NODE_COLOR,
            None => collection_color(project.collection()),
        };
        format!(
            "  \"{}\" [label=\"{}\", fillcolor=\"{}\"];\n",
            escape_dot(project.path()),
            label,
            fill
        )
    }

    /// Classify an edge without serializing the whole graph
    pub fn edge_style(
        &self,
        edge: &DependencyEdge,
        cycles: &[CycleInfo],
        suggestions: &[CycleBreakingSuggestion],
    ) -> EdgeStyle {
        Overlay::new(cycles, suggestions, None, self.config.top_n).edge_style(edge)
    }
}

fn edge_line(edge: &DependencyEdge, style: EdgeStyle) -> String {
    let penwidth = match edge.strength() {
        crate::core::CouplingStrength::Weak => 1,
        crate::core::CouplingStrength::Medium => 2,
        crate::core::CouplingStrength::Strong => 3,
    };
    let attributes = match style {
        EdgeStyle::SuggestedBreak { rank } => format!(
            "color=\"{}\", penwidth={}, style=dashed, label=\"break #{} ({})\"",
            BREAK_EDGE_COLOR, penwidth, rank, edge.coupling_weight
        ),
        EdgeStyle::Cycle => format!(
            "color=\"{}\", penwidth={}, label=\"{}\"",
            CYCLE_EDGE_COLOR, penwidth, edge.coupling_weight
        ),
        EdgeStyle::CrossCollection => format!(
            "color=\"{}\", penwidth={}",
            collection_pair_color(edge.source.collection(), edge.target.collection()),
            penwidth
        ),
        EdgeStyle::Default => format!("color=\"{}\", penwidth={}", DEFAULT_EDGE_COLOR, penwidth),
    };
    format!(
        "  \"{}\" -> \"{}\" [{}];\n",
        escape_dot(edge.source.path()),
        escape_dot(edge.target.path()),
        attributes
    )
}

/// Lookup tables built once per serialization
struct Overlay<'a> {
    cycle_of: HashMap<&'a str, usize>,
    breaks: HashMap<(&'a str, &'a str), usize>,
    scores: HashMap<&'a str, &'a ExtractionScore>,
    has_scores: bool,
}

impl<'a> Overlay<'a> {
    fn new(
        cycles: &'a [CycleInfo],
        suggestions: &'a [CycleBreakingSuggestion],
        scores: Option<&'a [ExtractionScore]>,
        top_n: usize,
    ) -> Self {
        let cycle_of = cycles
            .iter()
            .flat_map(|c| c.members.iter().map(move |m| (m.key(), c.id)))
            .collect();

        let mut breaks = HashMap::new();
        let mut ranked: Vec<&CycleBreakingSuggestion> = suggestions.iter().collect();
        ranked.sort_by_key(|s| s.rank);
        for suggestion in ranked.into_iter().take(top_n) {
            let key = (suggestion.edge.source.key(), suggestion.edge.target.key());
            breaks.entry(key).or_insert(suggestion.rank);
        }

        let scores_map = scores
            .unwrap_or_default()
            .iter()
            .map(|s| (s.project.key(), s))
            .collect();

        Self {
            cycle_of,
            breaks,
            scores: scores_map,
            has_scores: scores.is_some(),
        }
    }

    fn score_of(&self, project: &ProjectNode) -> Option<&'a ExtractionScore> {
        self.scores.get(project.key()).copied()
    }

    fn edge_style(&self, edge: &DependencyEdge) -> EdgeStyle {
        let (source, target) = (edge.source.key(), edge.target.key());
        if let Some(&rank) = self.breaks.get(&(source, target)) {
            return EdgeStyle::SuggestedBreak { rank };
        }
        let same_cycle = match (self.cycle_of.get(source), self.cycle_of.get(target)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        };
        if same_cycle && !edge.is_self_reference() {
            EdgeStyle::Cycle
        } else if edge.is_cross_collection() {
            EdgeStyle::CrossCollection
        } else {
            EdgeStyle::Default
        }
    }
}

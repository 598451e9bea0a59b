//! End-to-end analysis: dataset in, graph, cycles, suggestions and scores out.
//!
//! Stages run in a fixed order and the cancellation token is checked between
//! every stage. Data-integrity warnings from each stage are collected into
//! the report; only validation, inconsistency and cancellation abort a run.

use crate::config::{DepmapConfig, VisualizationConfig};
use crate::core::{
    AnalysisWarning, CancellationToken, CycleBreakingSuggestion, CycleInfo, Error, ProjectNode,
    Result,
};
use crate::cycles::{CycleDetector, RecommendationGenerator, WeakEdgeIdentifier};
use crate::graph::{DependencyGraph, FrameworkFilter, GraphBuilder};
use crate::io::csv;
use crate::io::dot::DotSerializer;
use crate::io::input::ProjectDataset;
use crate::scoring::{collect_project_metrics, ExtractionScore, ExtractionScorer};
use serde::Serialize;
use std::collections::HashSet;
use std::io;
use tracing::{debug, info, info_span};

/// Overview statistics for a finished analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisSummary {
    pub project_count: usize,
    pub projects_in_cycles: usize,
    /// Share of projects that sit in some cycle, 0-100
    pub cycle_participation: f64,
    pub orphan_count: usize,
    pub cross_collection_edges: usize,
}

impl AnalysisSummary {
    /// Build a summary, rejecting counts that cannot describe the same graph
    pub fn new(
        project_count: usize,
        projects_in_cycles: usize,
        orphan_count: usize,
        cross_collection_edges: usize,
    ) -> Result<Self> {
        if projects_in_cycles > project_count {
            return Err(Error::Inconsistent(format!(
                "{} projects in cycles but only {} projects in the graph",
                projects_in_cycles, project_count
            )));
        }
        if orphan_count > project_count {
            return Err(Error::Inconsistent(format!(
                "{} orphan projects but only {} projects in the graph",
                orphan_count, project_count
            )));
        }

        let cycle_participation = if project_count == 0 {
            0.0
        } else {
            projects_in_cycles as f64 / project_count as f64 * 100.0
        };

        Ok(Self {
            project_count,
            projects_in_cycles,
            cycle_participation,
            orphan_count,
            cross_collection_edges,
        })
    }

    /// Derive the summary from a filtered graph and its cycles.
    ///
    /// Only the dataset's own `projects` are counted; external assembly
    /// vertices in `graph` never appear as projects, orphans or cycle members.
    pub fn from_graph(
        graph: &DependencyGraph,
        projects: &[ProjectNode],
        cycles: &[CycleInfo],
    ) -> Result<Self> {
        let declared: HashSet<&str> = projects.iter().map(ProjectNode::key).collect();
        let projects_in_cycles = cycles
            .iter()
            .flat_map(|cycle| &cycle.members)
            .filter(|member| declared.contains(member.key()))
            .count();

        let mut orphan_count = 0;
        for project in projects {
            if graph.has_no_outgoing(project)? && graph.has_no_incoming(project)? {
                orphan_count += 1;
            }
        }

        let cross_collection_edges = graph
            .edges()
            .iter()
            .filter(|e| e.is_cross_collection())
            .count();
        Self::new(
            projects.len(),
            projects_in_cycles,
            orphan_count,
            cross_collection_edges,
        )
    }
}

/// Everything one analysis run produces
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    /// The graph after framework filtering
    pub graph: DependencyGraph,
    pub original_edge_count: usize,
    pub removed_edge_count: usize,
    pub cycles: Vec<CycleInfo>,
    /// Every ranked suggestion; consumers take their own top-N slice
    pub suggestions: Vec<CycleBreakingSuggestion>,
    /// Easiest to extract first
    pub scores: Vec<ExtractionScore>,
    pub warnings: Vec<AnalysisWarning>,
    pub summary: AnalysisSummary,
}

impl AnalysisReport {
    pub fn top_suggestions(&self, n: usize) -> &[CycleBreakingSuggestion] {
        &self.suggestions[..n.min(self.suggestions.len())]
    }

    pub fn to_dot(&self, config: &VisualizationConfig) -> String {
        let scores = (!self.scores.is_empty()).then_some(self.scores.as_slice());
        DotSerializer::new(config.clone()).serialize(
            &self.graph,
            &self.cycles,
            &self.suggestions,
            scores,
        )
    }

    pub fn write_scores_csv<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        csv::write_extraction_scores(out, &self.scores)
    }

    pub fn write_suggestions_csv<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        csv::write_cycle_suggestions(out, &self.suggestions, &self.cycles)
    }

    pub fn write_matrix_csv<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        csv::write_dependency_matrix(out, &self.graph)
    }
}

#[derive(Debug, Clone)]
pub struct AnalysisPipeline {
    filter: FrameworkFilter,
    detector: CycleDetector,
    weak_edges: WeakEdgeIdentifier,
    recommendations: RecommendationGenerator,
    scorer: ExtractionScorer,
}

impl AnalysisPipeline {
    /// Validate `config` and wire up every stage from it
    pub fn new(config: &DepmapConfig) -> Result<Self> {
        crate::config::validate_config(config)?;

        let filter_config = config.filter();
        let filter = if filter_config.enabled {
            FrameworkFilter::new(&filter_config)
        } else {
            FrameworkFilter::disabled()
        };

        Ok(Self {
            filter,
            detector: CycleDetector::new(),
            weak_edges: WeakEdgeIdentifier::new(),
            recommendations: RecommendationGenerator::new(&config.recommendations()),
            scorer: ExtractionScorer::new(config.scoring_weights())?,
        })
    }

    /// Replace the framework filter with one that keeps every edge
    pub fn without_filter(mut self) -> Self {
        self.filter = FrameworkFilter::disabled();
        self
    }

    pub fn run(
        &self,
        dataset: &ProjectDataset,
        cancel: &CancellationToken,
    ) -> Result<AnalysisReport> {
        let _span = info_span!("analysis", projects = dataset.projects.len()).entered();
        cancel.check()?;

        let built = {
            let _stage = info_span!("build_graph").entered();
            GraphBuilder::new().build(dataset, cancel)?
        };
        let mut warnings = built.warnings;
        let original_edge_count = built.graph.dependency_count();
        info!(
            "Built graph with {} projects and {} dependencies",
            built.graph.project_count(),
            original_edge_count
        );
        cancel.check()?;

        let filtered = {
            let _stage = info_span!("filter_frameworks").entered();
            self.filter.apply(&built.graph)?
        };
        info!(
            "Framework filter removed {} dependencies",
            filtered.removed_edges
        );
        let graph = filtered.graph;
        cancel.check()?;

        let mut cycles = self.detector.detect(&graph, cancel)?;
        info!("Found {} cycles", cycles.len());

        warnings.extend(self.weak_edges.identify(&graph, &mut cycles, cancel)?);
        let suggestions = self.recommendations.generate(&cycles, cancel)?;
        cancel.check()?;

        let scores = {
            let _stage = info_span!("score_projects").entered();
            let metrics = collect_project_metrics(dataset, &built.projects, &graph);
            self.scorer.score_all(&metrics)?
        };
        debug!("Scored {} projects", scores.len());
        cancel.check()?;

        let summary = AnalysisSummary::from_graph(&graph, &built.projects, &cycles)?;

        Ok(AnalysisReport {
            graph,
            original_edge_count,
            removed_edge_count: filtered.removed_edges,
            cycles,
            suggestions,
            scores,
            warnings,
            summary,
        })
    }
}

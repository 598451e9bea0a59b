//! Extraction difficulty scoring
//!
//! Combines coupling, complexity, tech debt and external API exposure into
//! one 0-100 score per project:
//!
//! ```text
//! final = Σ weight_i × metric_i
//! ```
//!
//! When the coupling metric is unavailable the remaining weights are
//! rescaled to sum to 1.0 so the score stays on the same scale as projects
//! with every metric present. If the remaining weights are all zero the
//! score is 0.

use crate::config::ScoringWeights;
use crate::core::{Error, ProjectNode, Result};
use crate::graph::compare_projects;
use rayon::prelude::*;
use serde::Serialize;
use std::cmp::Ordering;

/// Normalized inputs for one project
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectMetrics {
    pub project: ProjectNode,
    /// `None` when semantic coupling analysis could not run
    pub coupling: Option<f64>,
    pub complexity: f64,
    pub tech_debt: f64,
    pub api_exposure: f64,
    /// Raw endpoint count, kept for export
    pub external_api_count: u32,
}

/// Composite difficulty score for one project
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionScore {
    pub project: ProjectNode,
    pub coupling: Option<f64>,
    pub complexity: f64,
    pub tech_debt: f64,
    pub api_exposure: f64,
    pub external_api_count: u32,
    pub weights: ScoringWeights,
    pub final_score: f64,
}

impl ExtractionScore {
    pub fn name(&self) -> &str {
        self.project.name()
    }

    /// Score rounded to the nearest integer, as shown in labels
    pub fn rounded(&self) -> u32 {
        self.final_score.round() as u32
    }
}

#[derive(Debug, Clone)]
pub struct ExtractionScorer {
    weights: ScoringWeights,
}

impl ExtractionScorer {
    /// Create a scorer; weights must already satisfy the range and sum rules
    pub fn new(weights: ScoringWeights) -> Result<Self> {
        weights.validate().map_err(Error::configuration)?;
        Ok(Self { weights })
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Score one project
    pub fn score(&self, metrics: &ProjectMetrics) -> Result<ExtractionScore> {
        validate_metrics(metrics)?;
        let final_score = weighted_score(
            &self.weights,
            metrics.coupling,
            metrics.complexity,
            metrics.tech_debt,
            metrics.api_exposure,
        );
        Ok(ExtractionScore {
            project: metrics.project.clone(),
            coupling: metrics.coupling,
            complexity: metrics.complexity,
            tech_debt: metrics.tech_debt,
            api_exposure: metrics.api_exposure,
            external_api_count: metrics.external_api_count,
            weights: self.weights,
            final_score,
        })
    }

    /// Score every project, easiest to extract first
    pub fn score_all(&self, metrics: &[ProjectMetrics]) -> Result<Vec<ExtractionScore>> {
        let mut scores = metrics
            .par_iter()
            .map(|m| self.score(m))
            .collect::<Result<Vec<_>>>()?;
        scores.sort_by(compare_scores);
        Ok(scores)
    }
}

/// Pure function: weighted sum with coupling renormalization
pub fn weighted_score(
    weights: &ScoringWeights,
    coupling: Option<f64>,
    complexity: f64,
    tech_debt: f64,
    api_exposure: f64,
) -> f64 {
    let rest = weights.complexity * complexity
        + weights.tech_debt * tech_debt
        + weights.external_exposure * api_exposure;

    let score = match coupling {
        Some(coupling) => weights.coupling * coupling + rest,
        None => {
            let remaining = weights.complexity + weights.tech_debt + weights.external_exposure;
            if remaining <= 0.0 {
                0.0
            } else {
                rest / remaining
            }
        }
    };
    score.clamp(0.0, 100.0)
}

/// Pure function: ascending score, ties by project name
pub fn compare_scores(a: &ExtractionScore, b: &ExtractionScore) -> Ordering {
    a.final_score
        .total_cmp(&b.final_score)
        .then_with(|| compare_projects(&a.project, &b.project))
}

fn validate_metrics(metrics: &ProjectMetrics) -> Result<()> {
    let check = |metric: &'static str, value: f64| {
        if value.is_finite() && (0.0..=100.0).contains(&value) {
            Ok(())
        } else {
            Err(Error::InvalidMetric {
                project: metrics.project.name().to_string(),
                metric,
                value,
            })
        }
    };
    if let Some(coupling) = metrics.coupling {
        check("coupling", coupling)?;
    }
    check("complexity", metrics.complexity)?;
    check("tech debt", metrics.tech_debt)?;
    check("external API exposure", metrics.api_exposure)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(name: &str, coupling: Option<f64>, rest: [f64; 3]) -> ProjectMetrics {
        ProjectMetrics {
            project: ProjectNode::new(name, name).unwrap(),
            coupling,
            complexity: rest[0],
            tech_debt: rest[1],
            api_exposure: rest[2],
            external_api_count: 0,
        }
    }

    fn scorer() -> ExtractionScorer {
        ExtractionScorer::new(ScoringWeights::default()).unwrap()
    }

    #[test]
    fn test_default_weighted_sum() {
        let score = scorer()
            .score(&metrics("A", Some(50.0), [100.0, 20.0, 0.0]))
            .unwrap();
        // 0.4*50 + 0.3*100 + 0.2*20 + 0.1*0
        assert!((score.final_score - 54.0).abs() < 1e-9);
        assert_eq!(score.rounded(), 54);
    }

    #[test]
    fn test_missing_coupling_renormalizes_remaining_weights() {
        let score = scorer()
            .score(&metrics("A", None, [60.0, 60.0, 60.0]))
            .unwrap();
        assert!((score.final_score - 60.0).abs() < 1e-9);

        let uneven = scorer()
            .score(&metrics("B", None, [100.0, 0.0, 0.0]))
            .unwrap();
        // 0.3*100 / 0.6
        assert!((uneven.final_score - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_coupling_with_all_weight_on_coupling() {
        let weights = ScoringWeights {
            coupling: 1.0,
            complexity: 0.0,
            tech_debt: 0.0,
            external_exposure: 0.0,
        };
        let scorer = ExtractionScorer::new(weights).unwrap();
        let score = scorer.score(&metrics("A", None, [90.0, 90.0, 90.0])).unwrap();
        assert_eq!(score.final_score, 0.0);
    }

    #[test]
    fn test_invalid_weights_rejected_up_front() {
        let weights = ScoringWeights {
            coupling: 0.7,
            ..ScoringWeights::default()
        };
        assert!(matches!(
            ExtractionScorer::new(weights),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_out_of_range_metric_rejected() {
        let result = scorer().score(&metrics("A", Some(101.0), [0.0, 0.0, 0.0]));
        assert!(matches!(
            result,
            Err(Error::InvalidMetric {
                metric: "coupling",
                ..
            })
        ));
        assert!(scorer()
            .score(&metrics("A", None, [f64::NAN, 0.0, 0.0]))
            .is_err());
    }

    #[test]
    fn test_score_all_sorted_ascending_with_name_ties() {
        let scores = scorer()
            .score_all(&[
                metrics("Zeta", Some(10.0), [10.0, 10.0, 10.0]),
                metrics("Hard", Some(90.0), [90.0, 90.0, 90.0]),
                metrics("Alpha", Some(10.0), [10.0, 10.0, 10.0]),
            ])
            .unwrap();

        let names: Vec<&str> = scores.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["Alpha", "Zeta", "Hard"]);
    }
}

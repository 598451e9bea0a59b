//! Scoring configuration for extraction difficulty
//!
//! Weights for the four extraction-difficulty components. Validation is a
//! load-time precondition: the scorer assumes weights are valid.

use serde::{Deserialize, Serialize};

/// Tolerance for the weights-sum check
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.001;

/// Extraction scoring weights configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Weight for coupling metric (0.0-1.0)
    #[serde(default = "default_coupling_weight")]
    pub coupling: f64,

    /// Weight for cyclomatic complexity metric (0.0-1.0)
    #[serde(default = "default_complexity_weight")]
    pub complexity: f64,

    /// Weight for technology/platform debt metric (0.0-1.0)
    #[serde(default = "default_tech_debt_weight")]
    pub tech_debt: f64,

    /// Weight for external API exposure metric (0.0-1.0)
    #[serde(default = "default_external_exposure_weight")]
    pub external_exposure: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            coupling: default_coupling_weight(),
            complexity: default_complexity_weight(),
            tech_debt: default_tech_debt_weight(),
            external_exposure: default_external_exposure_weight(),
        }
    }
}

impl ScoringWeights {
    // Pure function: Check if a weight is in valid range
    pub fn is_valid_weight(weight: f64) -> bool {
        weight.is_finite() && (0.0..=1.0).contains(&weight)
    }

    // Pure function: Validate a single weight with name
    pub fn validate_weight(weight: f64, name: &str) -> Result<(), String> {
        if Self::is_valid_weight(weight) {
            Ok(())
        } else {
            Err(format!(
                "{} weight must be between 0.0 and 1.0, got {}",
                name, weight
            ))
        }
    }

    pub fn sum(&self) -> f64 {
        self.coupling + self.complexity + self.tech_debt + self.external_exposure
    }

    // Pure function: Validate weights sum to 1.0
    pub fn validate_sum(&self) -> Result<(), String> {
        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            Err(format!(
                "Scoring weights (coupling, complexity, tech_debt, external_exposure) must sum to 1.0, but sum to {:.3}",
                sum
            ))
        } else {
            Ok(())
        }
    }

    // Pure function: Collect all weight validations
    pub fn collect_weight_validations(&self) -> Vec<Result<(), String>> {
        vec![
            Self::validate_weight(self.coupling, "Coupling"),
            Self::validate_weight(self.complexity, "Complexity"),
            Self::validate_weight(self.tech_debt, "Tech debt"),
            Self::validate_weight(self.external_exposure, "External exposure"),
        ]
    }

    /// Every problem with these weights; empty when valid
    pub fn validation_errors(&self) -> Vec<String> {
        let mut errors: Vec<String> = self
            .collect_weight_validations()
            .into_iter()
            .filter_map(Result::err)
            .collect();
        // A sum check over out-of-range weights only repeats the range error
        if errors.is_empty() {
            if let Err(e) = self.validate_sum() {
                errors.push(e);
            }
        }
        errors
    }

    /// Validate range and sum; returns the first problem found
    pub fn validate(&self) -> Result<(), String> {
        match self.validation_errors().into_iter().next() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

pub fn default_coupling_weight() -> f64 {
    0.40
}
pub fn default_complexity_weight() -> f64 {
    0.30
}
pub fn default_tech_debt_weight() -> f64 {
    0.20
}
pub fn default_external_exposure_weight() -> f64 {
    0.10
}

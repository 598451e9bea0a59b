//! Validation with error accumulation for configuration.
//!
//! Every section is checked and all problems are reported together, so a
//! user fixing `.depmap.toml` sees every issue in a single run.

use super::DepmapConfig;
use crate::core::{Error, Result};

/// Pure function: all validation problems of a configuration
pub fn collect_config_errors(config: &DepmapConfig) -> Vec<String> {
    let mut errors = Vec::new();

    if let Some(scoring) = &config.scoring {
        errors.extend(
            scoring
                .validation_errors()
                .into_iter()
                .map(|e| format!("scoring: {}", e)),
        );
    }
    if let Some(filter) = &config.filter {
        errors.extend(filter.validation_errors());
    }
    if let Some(recommendations) = &config.recommendations {
        errors.extend(recommendations.validation_errors());
    }

    errors
}

/// Fail fast with every problem listed when a configuration is invalid
pub fn validate_config(config: &DepmapConfig) -> Result<()> {
    let errors = collect_config_errors(config);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(Error::configuration(errors.join("; ")))
    }
}

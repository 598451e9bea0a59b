// Sub-modules
mod display;
mod filter;
mod scoring;
mod thresholds;

// Core configuration types
mod core;
pub mod loader;
pub mod validation;

pub use self::core::DepmapConfig;
pub use display::{RankDirection, VisualizationConfig};
pub use filter::FilterConfig;
pub use loader::{
    find_config_file, load_config, load_config_from_path, parse_and_validate_config,
    render_config, CONFIG_FILE_NAME,
};
pub use scoring::{
    default_complexity_weight, default_coupling_weight, default_external_exposure_weight,
    default_tech_debt_weight, ScoringWeights, WEIGHT_SUM_TOLERANCE,
};
pub use thresholds::RecommendationConfig;
pub use validation::validate_config;

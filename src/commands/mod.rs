//! CLI command implementations.
//!
//! - **analyze**: run the dependency analysis and write the graph and CSV reports
//! - **init**: write a default `.depmap.toml`

pub mod analyze;
pub mod init;

pub use analyze::{handle_analyze, run_with_timeout, write_reports, AnalyzeConfig};
pub use init::{init_config, init_config_in};

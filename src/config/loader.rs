use std::fs;
use std::path::{Path, PathBuf};

use super::core::DepmapConfig;
use super::validation::validate_config;
use crate::core::{Error, Result};

/// File name searched for in the working directory and its ancestors
pub const CONFIG_FILE_NAME: &str = ".depmap.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Pure function to parse and validate config from TOML string.
///
/// Invalid weights or patterns are an error; there is no silent fallback to
/// defaults.
pub fn parse_and_validate_config(contents: &str) -> Result<DepmapConfig> {
    let config = toml::from_str::<DepmapConfig>(contents).map_err(|e| {
        Error::configuration(format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e))
    })?;
    validate_config(&config)?;
    Ok(config)
}

/// Load and validate a specific configuration file
pub fn load_config_from_path(path: &Path) -> Result<DepmapConfig> {
    let contents = fs::read_to_string(path).map_err(|e| {
        Error::configuration(format!("Failed to read {}: {}", path.display(), e))
    })?;
    let config = parse_and_validate_config(&contents)?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Find the nearest `.depmap.toml` starting at `start`
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    directory_ancestors(start.to_path_buf(), MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|path| path.is_file())
}

/// Resolve the configuration for a run.
///
/// An explicit path must exist and be valid. Without one, the nearest
/// `.depmap.toml` above `start` is used, and defaults apply when none is
/// found.
pub fn load_config(explicit: Option<&Path>, start: &Path) -> Result<DepmapConfig> {
    if let Some(path) = explicit {
        return load_config_from_path(path);
    }

    match find_config_file(start) {
        Some(path) => load_config_from_path(&path),
        None => {
            tracing::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            Ok(DepmapConfig::default())
        }
    }
}

/// Serialize a configuration the way `depmap init` writes it
pub fn render_config(config: &DepmapConfig) -> Result<String> {
    toml::to_string_pretty(config)
        .map_err(|e| Error::configuration(format!("Failed to serialize config: {}", e)))
}

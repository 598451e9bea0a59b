use crate::config::{render_config, DepmapConfig, CONFIG_FILE_NAME};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_HEADER: &str = "# depmap configuration\n\
# Scoring weights must each lie in [0, 1] and sum to 1.0.\n\n";

/// Write a fully populated default configuration into `dir`
pub fn init_config_in(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    let body = render_config(&DepmapConfig::with_all_defaults())?;
    fs::write(&config_path, format!("{}{}", CONFIG_HEADER, body))
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    Ok(config_path)
}

pub fn init_config(force: bool) -> Result<()> {
    let path = init_config_in(Path::new("."), force)?;
    println!("Created {} configuration file", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_and_validate_config;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_loadable_defaults() {
        let dir = TempDir::new().unwrap();
        let path = init_config_in(dir.path(), false).unwrap();

        let contents = fs::read_to_string(path).unwrap();
        let config = parse_and_validate_config(&contents).unwrap();
        assert_eq!(config, DepmapConfig::with_all_defaults());
    }

    #[test]
    fn test_init_refuses_to_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "# mine").unwrap();

        assert!(init_config_in(dir.path(), false).is_err());
        assert_eq!(
            fs::read_to_string(dir.path().join(CONFIG_FILE_NAME)).unwrap(),
            "# mine"
        );

        init_config_in(dir.path(), true).unwrap();
        assert_ne!(
            fs::read_to_string(dir.path().join(CONFIG_FILE_NAME)).unwrap(),
            "# mine"
        );
    }
}

use serde::{Deserialize, Serialize};

/// Framework noise filter configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Whether framework filtering runs at all
    #[serde(default = "default_filter_enabled")]
    pub enabled: bool,

    /// Target names whose edges are removed (exact or `prefix*`)
    #[serde(default = "default_block_patterns")]
    pub block: Vec<String>,

    /// Target names kept even when a block pattern matches
    #[serde(default)]
    pub allow: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            enabled: default_filter_enabled(),
            block: default_block_patterns(),
            allow: Vec::new(),
        }
    }
}

impl FilterConfig {
    /// Patterns that are empty after trimming
    pub fn validation_errors(&self) -> Vec<String> {
        let blank = |list: &[String], name: &str| {
            list.iter()
                .enumerate()
                .filter(|(_, p)| p.trim().is_empty())
                .map(|(i, _)| format!("filter.{}[{}] is an empty pattern", name, i))
                .collect::<Vec<_>>()
        };
        let mut errors = blank(&self.block, "block");
        errors.extend(blank(&self.allow, "allow"));
        errors
    }
}

fn default_filter_enabled() -> bool {
    true
}

fn default_block_patterns() -> Vec<String> {
    [
        "System",
        "System.*",
        "Microsoft.*",
        "mscorlib",
        "netstandard",
        "NETStandard.*",
        "WindowsBase",
        "PresentationCore",
        "PresentationFramework",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_block_framework_assemblies() {
        let config = FilterConfig::default();
        assert!(config.enabled);
        assert!(config.block.iter().any(|p| p == "System.*"));
        assert!(config.allow.is_empty());
        assert!(config.validation_errors().is_empty());
    }

    #[test]
    fn test_blank_patterns_are_reported() {
        let config = FilterConfig {
            enabled: true,
            block: vec!["System.*".into(), "  ".into()],
            allow: vec!["".into()],
        };
        assert_eq!(
            config.validation_errors(),
            vec![
                "filter.block[1] is an empty pattern".to_string(),
                "filter.allow[0] is an empty pattern".to_string(),
            ]
        );
    }
}

//! Normalized project dataset consumed by the pipeline.
//!
//! The dataset is produced by whatever loads project files from a build
//! system; depmap only reads the JSON contract below.
//!
//! ```json
//! {
//!   "semantic_analysis": true,
//!   "projects": [
//!     {
//!       "name": "Billing",
//!       "path": "src/Billing/Billing.csproj",
//!       "platform": "net48",
//!       "collection": "Backoffice",
//!       "complexity": 412,
//!       "external_endpoints": 3,
//!       "references": [
//!         { "target": "src/Core/Core.csproj", "kind": "project", "method_calls": 12 },
//!         { "target": "System.Core", "kind": "assembly" }
//!       ]
//!     }
//!   ]
//! }
//! ```

use crate::core::{Error, ReferenceKind, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectDataset {
    /// Whether semantic (method-call) coupling analysis ran for this dataset
    #[serde(default = "default_semantic_analysis")]
    pub semantic_analysis: bool,

    #[serde(default)]
    pub projects: Vec<ProjectRecord>,
}

impl Default for ProjectDataset {
    fn default() -> Self {
        Self {
            semantic_analysis: default_semantic_analysis(),
            projects: Vec::new(),
        }
    }
}

fn default_semantic_analysis() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProjectRecord {
    pub name: String,
    pub path: String,

    #[serde(default)]
    pub platform: String,

    #[serde(default)]
    pub collection: String,

    #[serde(default)]
    pub references: Vec<ReferenceRecord>,

    /// Raw cyclomatic complexity count
    #[serde(default)]
    pub complexity: u32,

    /// Number of externally callable endpoints
    #[serde(default)]
    pub external_endpoints: u32,

    /// Per-project override of the dataset-level flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_analysis: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceRecord {
    /// Canonical path or display name of the referenced project/binary
    pub target: String,

    #[serde(default)]
    pub kind: ReferenceKind,

    /// Method calls crossing this reference, when semantic analysis ran
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method_calls: Option<u32>,
}

impl ProjectDataset {
    /// Parse a dataset from JSON text
    pub fn from_json(contents: &str) -> Result<Self> {
        let dataset: ProjectDataset = serde_json::from_str(contents)?;
        dataset.validate()?;
        Ok(dataset)
    }

    /// Read and parse a dataset file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let dataset = Self::from_json(&contents)?;
        tracing::debug!(
            "Loaded {} projects from {}",
            dataset.projects.len(),
            path.display()
        );
        Ok(dataset)
    }

    /// Reject records missing a name, path or reference target
    pub fn validate(&self) -> Result<()> {
        for (position, project) in self.projects.iter().enumerate() {
            if project.name.trim().is_empty() {
                return Err(Error::invalid_input(format!(
                    "project #{} has an empty name",
                    position + 1
                )));
            }
            if project.path.trim().is_empty() {
                return Err(Error::invalid_input(format!(
                    "project '{}' has an empty path",
                    project.name
                )));
            }
            if let Some(reference) = project.references.iter().find(|r| r.target.trim().is_empty())
            {
                return Err(Error::invalid_input(format!(
                    "project '{}' declares a {} reference with an empty target",
                    project.name, reference.kind
                )));
            }
        }
        Ok(())
    }

    /// Effective semantic-analysis availability for one project
    pub fn has_semantic_coupling(&self, project: &ProjectRecord) -> bool {
        project.semantic_analysis.unwrap_or(self.semantic_analysis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_parse_minimal_dataset_with_defaults() {
        let dataset = ProjectDataset::from_json(indoc! {r#"
            {
              "projects": [
                { "name": "Core", "path": "src/Core/Core.csproj" },
                {
                  "name": "Web",
                  "path": "src/Web/Web.csproj",
                  "references": [
                    { "target": "src/Core/Core.csproj", "method_calls": 4 },
                    { "target": "System.Web", "kind": "assembly" }
                  ]
                }
              ]
            }
        "#})
        .unwrap();

        assert!(dataset.semantic_analysis);
        assert_eq!(dataset.projects.len(), 2);
        let web = &dataset.projects[1];
        assert_eq!(web.references[0].kind, ReferenceKind::Project);
        assert_eq!(web.references[0].method_calls, Some(4));
        assert_eq!(web.references[1].kind, ReferenceKind::Assembly);
        assert_eq!(web.complexity, 0);
    }

    #[test]
    fn test_empty_path_is_rejected() {
        let result = ProjectDataset::from_json(r#"{ "projects": [ { "name": "A", "path": "" } ] }"#);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_empty_reference_target_is_rejected() {
        let result = ProjectDataset::from_json(
            r#"{ "projects": [ { "name": "A", "path": "a", "references": [ { "target": " " } ] } ] }"#,
        );
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_semantic_override() {
        let dataset = ProjectDataset::from_json(
            r#"{ "semantic_analysis": false, "projects": [
                { "name": "A", "path": "a" },
                { "name": "B", "path": "b", "semantic_analysis": true } ] }"#,
        )
        .unwrap();

        assert!(!dataset.has_semantic_coupling(&dataset.projects[0]));
        assert!(dataset.has_semantic_coupling(&dataset.projects[1]));
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(matches!(
            ProjectDataset::from_json("{ not json"),
            Err(Error::Json(_))
        ));
    }
}

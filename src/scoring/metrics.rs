//! Metric normalizers feeding the extraction scorer.
//!
//! Every metric ends up on a 0-100 scale. Counts (coupling, complexity,
//! endpoints) are normalized against the largest value in the dataset;
//! platform debt comes from a fixed table of target framework generations.

use super::extraction::ProjectMetrics;
use crate::core::{canonical_key, ProjectNode};
use crate::graph::DependencyGraph;
use crate::io::input::{ProjectDataset, ProjectRecord};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::HashMap;

/// Target platform generation parsed from a framework tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformGeneration {
    /// .NET 5 and later (`net5.0`, `net8.0-windows`)
    Modern { major: u32 },
    /// .NET Core (`netcoreapp3.1`)
    Core,
    /// .NET Standard (`netstandard2.0`)
    Standard,
    /// .NET Framework (`net48`, `v4.7.2`)
    Framework { major: u32, minor: u32 },
    Unknown,
}

/// Pure function: classify a target framework tag
pub fn classify_platform(tag: &str) -> PlatformGeneration {
    let tag = tag.trim().to_lowercase();
    if tag.is_empty() {
        return PlatformGeneration::Unknown;
    }

    if let Some((identifier, version)) = tag.split_once(",version=") {
        return match identifier.trim_start_matches('.') {
            "netcoreapp" => PlatformGeneration::Core,
            "netstandard" => PlatformGeneration::Standard,
            "netframework" => parse_dotted_framework(version.trim_start_matches('v')),
            _ => PlatformGeneration::Unknown,
        };
    }
    if tag.starts_with("netcoreapp") {
        return PlatformGeneration::Core;
    }
    if tag.starts_with("netstandard") {
        return PlatformGeneration::Standard;
    }
    if let Some(version) = tag.strip_prefix('v') {
        return parse_dotted_framework(version);
    }
    if let Some(version) = tag.strip_prefix("net") {
        // `net8.0-windows` -> `8.0`
        let version = version.split('-').next().unwrap_or_default();
        if version.contains('.') {
            return match leading_number(version) {
                Some(major) if major >= 5 => PlatformGeneration::Modern { major },
                _ => PlatformGeneration::Unknown,
            };
        }
        let digits: Vec<u32> = version.chars().filter_map(|c| c.to_digit(10)).collect();
        if digits.len() == version.len() && !digits.is_empty() {
            return PlatformGeneration::Framework {
                major: digits[0],
                minor: digits.get(1).copied().unwrap_or(0),
            };
        }
    }
    PlatformGeneration::Unknown
}

fn parse_dotted_framework(version: &str) -> PlatformGeneration {
    let mut parts = version.split('.');
    match (parts.next().and_then(|p| p.parse::<u32>().ok()), parts.next()) {
        (Some(major), minor) if major < 5 => PlatformGeneration::Framework {
            major,
            minor: minor.and_then(|m| m.parse().ok()).unwrap_or(0),
        },
        (Some(major), _) => PlatformGeneration::Modern { major },
        _ => PlatformGeneration::Unknown,
    }
}

fn leading_number(text: &str) -> Option<u32> {
    let digits: String = text.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// Pure function: technology debt score (0-100) for a platform tag
pub fn tech_debt_score(tag: &str) -> f64 {
    match classify_platform(tag) {
        PlatformGeneration::Modern { major } => {
            let behind = major.saturating_sub(5).min(5);
            10.0 - 2.0 * behind as f64
        }
        PlatformGeneration::Core => 40.0,
        PlatformGeneration::Standard => 30.0,
        PlatformGeneration::Framework { major: 4, minor } if minor >= 6 => 60.0,
        PlatformGeneration::Framework { major: 4, .. } => 75.0,
        PlatformGeneration::Framework { .. } => 90.0,
        PlatformGeneration::Unknown => 50.0,
    }
}

/// Pure function: scale `value` to 0-100 against `max`
pub fn normalize(value: f64, max: f64) -> f64 {
    if max <= 0.0 {
        0.0
    } else {
        (value / max * 100.0).clamp(0.0, 100.0)
    }
}

/// Sum of coupling weights on edges into and out of each project,
/// self-references excluded
pub fn coupling_loads(graph: &DependencyGraph) -> HashMap<String, u64> {
    let inner = graph.inner();
    inner
        .node_indices()
        .map(|idx| {
            let load: u64 = [Direction::Outgoing, Direction::Incoming]
                .into_iter()
                .flat_map(|dir| inner.edges_directed(idx, dir))
                .filter(|e| e.source() != e.target())
                .map(|e| u64::from(e.weight().coupling_weight))
                .sum();
            (inner[idx].key().to_string(), load)
        })
        .collect()
}

/// Derive normalized metrics for every dataset project present in `graph`
pub fn collect_project_metrics(
    dataset: &ProjectDataset,
    projects: &[ProjectNode],
    graph: &DependencyGraph,
) -> Vec<ProjectMetrics> {
    let mut records: HashMap<String, &ProjectRecord> = HashMap::new();
    for record in &dataset.projects {
        records.entry(canonical_key(&record.path)).or_insert(record);
    }

    let loads = coupling_loads(graph);
    let entries: Vec<(&ProjectNode, &ProjectRecord, bool)> = projects
        .iter()
        .filter_map(|p| {
            records
                .get(p.key())
                .map(|r| (p, *r, dataset.has_semantic_coupling(r)))
        })
        .collect();

    let load_of = |p: &ProjectNode| loads.get(p.key()).copied().unwrap_or(0) as f64;
    let max_load = entries
        .iter()
        .filter(|(_, _, semantic)| *semantic)
        .map(|(p, _, _)| load_of(p))
        .fold(0.0, f64::max);
    let max_complexity = entries
        .iter()
        .map(|(_, r, _)| r.complexity as f64)
        .fold(0.0, f64::max);
    let max_endpoints = entries
        .iter()
        .map(|(_, r, _)| r.external_endpoints as f64)
        .fold(0.0, f64::max);

    entries
        .into_iter()
        .map(|(project, record, semantic)| ProjectMetrics {
            project: project.clone(),
            coupling: semantic.then(|| normalize(load_of(project), max_load)),
            complexity: normalize(record.complexity as f64, max_complexity),
            tech_debt: tech_debt_score(project.platform()),
            api_exposure: normalize(record.external_endpoints as f64, max_endpoints),
            external_api_count: record.external_endpoints,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ReferenceKind;
    use crate::io::input::ReferenceRecord;

    #[test]
    fn test_classify_platform_tags() {
        assert_eq!(
            classify_platform("net8.0-windows"),
            PlatformGeneration::Modern { major: 8 }
        );
        assert_eq!(classify_platform("netcoreapp3.1"), PlatformGeneration::Core);
        assert_eq!(classify_platform("netstandard2.0"), PlatformGeneration::Standard);
        assert_eq!(
            classify_platform("net472"),
            PlatformGeneration::Framework { major: 4, minor: 7 }
        );
        assert_eq!(
            classify_platform(".NETFramework,Version=v4.5.2"),
            PlatformGeneration::Framework { major: 4, minor: 5 }
        );
        assert_eq!(
            classify_platform("v3.5"),
            PlatformGeneration::Framework { major: 3, minor: 5 }
        );
        assert_eq!(classify_platform("java17"), PlatformGeneration::Unknown);
        assert_eq!(classify_platform(""), PlatformGeneration::Unknown);
    }

    #[test]
    fn test_tech_debt_ordering() {
        assert!(tech_debt_score("net8.0") < tech_debt_score("net5.0"));
        assert!(tech_debt_score("net5.0") < tech_debt_score("netstandard2.0"));
        assert!(tech_debt_score("netstandard2.0") < tech_debt_score("netcoreapp3.1"));
        assert!(tech_debt_score("netcoreapp3.1") < tech_debt_score("net48"));
        assert!(tech_debt_score("net48") < tech_debt_score("net45"));
        assert!(tech_debt_score("net45") < tech_debt_score("net35"));
        assert_eq!(tech_debt_score("unknown"), 50.0);
        assert_eq!(tech_debt_score("net10.0"), 0.0);
    }

    #[test]
    fn test_normalize_handles_zero_max() {
        assert_eq!(normalize(5.0, 0.0), 0.0);
        assert_eq!(normalize(5.0, 10.0), 50.0);
        assert_eq!(normalize(10.0, 10.0), 100.0);
    }

    fn record(name: &str, complexity: u32, endpoints: u32, refs: &[(&str, u32)]) -> ProjectRecord {
        ProjectRecord {
            name: name.to_string(),
            path: name.to_string(),
            platform: "net48".to_string(),
            complexity,
            external_endpoints: endpoints,
            references: refs
                .iter()
                .map(|(t, calls)| ReferenceRecord {
                    target: t.to_string(),
                    kind: ReferenceKind::Project,
                    method_calls: Some(*calls),
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_collect_project_metrics() {
        let dataset = ProjectDataset {
            semantic_analysis: true,
            projects: vec![
                record("A", 100, 0, &[("B", 6)]),
                record("B", 50, 4, &[("C", 2)]),
                record("C", 0, 2, &[]),
            ],
        };
        let outcome = crate::graph::GraphBuilder::new()
            .build(&dataset, &crate::core::CancellationToken::new())
            .unwrap();
        let metrics = collect_project_metrics(&dataset, &outcome.projects, &outcome.graph);

        let by_name = |n: &str| metrics.iter().find(|m| m.project.name() == n).unwrap();
        // loads: A=6, B=8, C=2
        assert_eq!(by_name("B").coupling, Some(100.0));
        assert_eq!(by_name("C").coupling, Some(25.0));
        assert_eq!(by_name("A").complexity, 100.0);
        assert_eq!(by_name("B").complexity, 50.0);
        assert_eq!(by_name("B").api_exposure, 100.0);
        assert_eq!(by_name("C").external_api_count, 2);
        assert_eq!(by_name("A").tech_debt, 60.0);
    }

    #[test]
    fn test_coupling_absent_without_semantic_analysis() {
        let mut dataset = ProjectDataset {
            semantic_analysis: true,
            projects: vec![record("A", 1, 0, &[("B", 3)]), record("B", 1, 0, &[])],
        };
        dataset.projects[0].semantic_analysis = Some(false);
        let outcome = crate::graph::GraphBuilder::new()
            .build(&dataset, &crate::core::CancellationToken::new())
            .unwrap();
        let metrics = collect_project_metrics(&dataset, &outcome.projects, &outcome.graph);

        assert_eq!(metrics[0].coupling, None);
        assert_eq!(metrics[1].coupling, Some(100.0));
    }
}

//! Builds a [`DependencyGraph`] from a normalized project dataset.
//!
//! Reference targets are resolved by canonical path first and then by a
//! unique display name. Unresolved project references are logged and
//! skipped; unresolved assembly references become external-binary vertices
//! so framework filtering can act on them later.

use super::DependencyGraph;
use crate::core::{
    AnalysisWarning, CancellationToken, ProjectNode, ReferenceKind, Result,
    DEFAULT_COUPLING_WEIGHT,
};
use crate::io::input::{ProjectDataset, ProjectRecord, ReferenceRecord};
use tracing::{debug, info, warn};

/// Graph plus everything that was skipped while building it
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    pub graph: DependencyGraph,
    /// Dataset projects that became vertices, in dataset order
    pub projects: Vec<ProjectNode>,
    pub warnings: Vec<AnalysisWarning>,
}

#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: DependencyGraph,
    projects: Vec<ProjectNode>,
    warnings: Vec<AnalysisWarning>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the graph for a whole dataset.
    ///
    /// Cancellation is checked once per project record in both passes.
    pub fn build(
        mut self,
        dataset: &ProjectDataset,
        cancel: &CancellationToken,
    ) -> Result<BuildOutcome> {
        dataset.validate()?;

        let accepted = self.add_projects(dataset, cancel)?;
        for (record, source) in accepted {
            cancel.check()?;
            let semantic = dataset.has_semantic_coupling(record);
            for reference in &record.references {
                self.add_reference(&source, reference, semantic)?;
            }
        }

        info!(
            "Built dependency graph: {} vertices, {} edges, {} warnings",
            self.graph.project_count(),
            self.graph.dependency_count(),
            self.warnings.len()
        );

        Ok(BuildOutcome {
            graph: self.graph,
            projects: self.projects,
            warnings: self.warnings,
        })
    }

    fn add_projects<'a>(
        &mut self,
        dataset: &'a ProjectDataset,
        cancel: &CancellationToken,
    ) -> Result<Vec<(&'a ProjectRecord, ProjectNode)>> {
        let mut accepted = Vec::with_capacity(dataset.projects.len());
        for record in &dataset.projects {
            cancel.check()?;
            let node = ProjectNode::new(&record.name, &record.path)?
                .with_platform(&record.platform)
                .with_collection(&record.collection);

            if self.graph.add_project(node.clone()) {
                self.projects.push(node.clone());
                accepted.push((record, node));
            } else {
                self.record(AnalysisWarning::DuplicateProject {
                    path: record.path.clone(),
                });
            }
        }
        Ok(accepted)
    }

    fn add_reference(
        &mut self,
        source: &ProjectNode,
        reference: &ReferenceRecord,
        semantic: bool,
    ) -> Result<()> {
        let target = match self.resolve(&reference.target) {
            Some(target) => target,
            None if reference.kind == ReferenceKind::Assembly => {
                let external = ProjectNode::new(&reference.target, &reference.target)?;
                debug!("Adding external binary vertex {}", reference.target);
                self.graph.add_project(external.clone());
                external
            }
            None => {
                self.record(AnalysisWarning::UnknownReference {
                    source: source.name().to_string(),
                    target: reference.target.clone(),
                });
                return Ok(());
            }
        };

        let weight = coupling_weight(reference, semantic);
        self.graph
            .add_dependency(source, &target, reference.kind, weight)?;
        Ok(())
    }

    fn resolve(&self, target: &str) -> Option<ProjectNode> {
        if let Some(found) = self.graph.find(target) {
            return Some(found.clone());
        }
        match self.graph.find_by_name(target).as_slice() {
            [single] => Some((*single).clone()),
            [] => None,
            candidates => {
                debug!(
                    "Reference '{}' matches {} projects by name; not resolved",
                    target,
                    candidates.len()
                );
                None
            }
        }
    }

    fn record(&mut self, warning: AnalysisWarning) {
        warn!("{}", warning);
        self.warnings.push(warning);
    }
}

/// Pure function: coupling weight of one declared reference
fn coupling_weight(reference: &ReferenceRecord, semantic: bool) -> u32 {
    match (semantic, reference.method_calls) {
        (true, Some(calls)) => calls,
        _ => DEFAULT_COUPLING_WEIGHT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, refs: Vec<ReferenceRecord>) -> ProjectRecord {
        ProjectRecord {
            name: name.to_string(),
            path: format!("src/{}/{}.csproj", name, name),
            collection: "Main".to_string(),
            references: refs,
            ..Default::default()
        }
    }

    fn reference(target: &str, kind: ReferenceKind, calls: Option<u32>) -> ReferenceRecord {
        ReferenceRecord {
            target: target.to_string(),
            kind,
            method_calls: calls,
        }
    }

    fn dataset(projects: Vec<ProjectRecord>) -> ProjectDataset {
        ProjectDataset {
            semantic_analysis: true,
            projects,
        }
    }

    fn build(data: &ProjectDataset) -> Result<BuildOutcome> {
        GraphBuilder::new().build(data, &CancellationToken::new())
    }

    #[test]
    fn test_resolves_by_path_and_by_name() {
        let outcome = build(&dataset(vec![
            record(
                "Web",
                vec![
                    reference("SRC/core/core.csproj", ReferenceKind::Project, Some(3)),
                    reference("data", ReferenceKind::Project, None),
                ],
            ),
            record("Core", vec![]),
            record("Data", vec![]),
        ]))
        .unwrap();

        assert!(outcome.warnings.is_empty());
        assert_eq!(outcome.graph.dependency_count(), 2);
        let web = outcome.graph.find("src/Web/Web.csproj").unwrap();
        let core = outcome.graph.find("src/Core/Core.csproj").unwrap();
        assert_eq!(outcome.graph.edge_between(web, core).unwrap().coupling_weight, 3);
    }

    #[test]
    fn test_unknown_project_reference_is_warned_and_skipped() {
        let outcome = build(&dataset(vec![record(
            "Web",
            vec![reference("Missing", ReferenceKind::Project, None)],
        )]))
        .unwrap();

        assert_eq!(outcome.graph.dependency_count(), 0);
        assert_eq!(
            outcome.warnings,
            vec![AnalysisWarning::UnknownReference {
                source: "Web".to_string(),
                target: "Missing".to_string(),
            }]
        );
    }

    #[test]
    fn test_assembly_reference_creates_external_vertex() {
        let outcome = build(&dataset(vec![record(
            "Web",
            vec![reference("System.Core", ReferenceKind::Assembly, None)],
        )]))
        .unwrap();

        assert_eq!(outcome.graph.project_count(), 2);
        assert_eq!(outcome.projects.len(), 1);
        let external = outcome.graph.find("System.Core").unwrap();
        assert_eq!(external.collection(), "");
    }

    #[test]
    fn test_duplicate_project_is_warned() {
        let mut duplicate = record("Core", vec![]);
        duplicate.name = "CoreCopy".to_string();
        let outcome = build(&dataset(vec![record("Core", vec![]), duplicate])).unwrap();

        assert_eq!(outcome.graph.project_count(), 1);
        assert!(matches!(
            outcome.warnings[0],
            AnalysisWarning::DuplicateProject { .. }
        ));
    }

    #[test]
    fn test_method_calls_ignored_without_semantic_analysis() {
        let mut data = dataset(vec![
            record("A", vec![reference("B", ReferenceKind::Project, Some(40))]),
            record("B", vec![]),
        ]);
        data.semantic_analysis = false;

        let outcome = build(&data).unwrap();
        let edge = &outcome.graph.edges()[0];
        assert_eq!(edge.coupling_weight, DEFAULT_COUPLING_WEIGHT);
    }

    #[test]
    fn test_repeated_references_merge() {
        let outcome = build(&dataset(vec![
            record(
                "A",
                vec![
                    reference("B", ReferenceKind::Project, Some(2)),
                    reference("B", ReferenceKind::Project, Some(11)),
                ],
            ),
            record("B", vec![]),
        ]))
        .unwrap();

        assert_eq!(outcome.graph.dependency_count(), 1);
        assert_eq!(outcome.graph.edges()[0].coupling_weight, 11);
    }

    #[test]
    fn test_cancelled_build_stops_before_any_vertex() {
        let token = CancellationToken::new();
        token.cancel();
        let result = GraphBuilder::new().build(
            &dataset(vec![record("A", vec![]), record("B", vec![])]),
            &token,
        );
        assert!(matches!(result, Err(crate::core::Error::Cancelled)));
    }

    #[test]
    fn test_name_resolution_over_many_projects() {
        let projects: Vec<ProjectRecord> = (0..5_000)
            .map(|i| {
                let next = format!("Module{}", (i + 1) % 5_000);
                record(
                    &format!("Module{}", i),
                    vec![reference(&next, ReferenceKind::Project, Some(1))],
                )
            })
            .collect();

        let outcome = build(&dataset(projects)).unwrap();
        assert!(outcome.warnings.is_empty());
        assert_eq!(outcome.graph.dependency_count(), 5_000);
    }
}

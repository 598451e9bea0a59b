// Shared fixtures for depmap integration tests
#![allow(dead_code)]

use depmap::io::input::{ProjectDataset, ProjectRecord, ReferenceRecord};
use depmap::{DependencyGraph, ProjectNode, ReferenceKind};

/// Project with path equal to its name and no references
pub fn project(name: &str) -> ProjectRecord {
    ProjectRecord {
        name: name.to_string(),
        path: name.to_string(),
        ..Default::default()
    }
}

/// Project reference carrying a semantic call count
pub fn calls(target: &str, method_calls: u32) -> ReferenceRecord {
    ReferenceRecord {
        target: target.to_string(),
        kind: ReferenceKind::Project,
        method_calls: Some(method_calls),
    }
}

pub fn assembly(target: &str) -> ReferenceRecord {
    ReferenceRecord {
        target: target.to_string(),
        kind: ReferenceKind::Assembly,
        method_calls: None,
    }
}

/// Dataset from `(source, target, weight)` triples; every named project is declared
pub fn weighted_dataset(edges: &[(&str, &str, u32)]) -> ProjectDataset {
    let mut projects: Vec<ProjectRecord> = Vec::new();
    for (source, target, _) in edges {
        for name in [source, target] {
            if !projects.iter().any(|p| p.name == *name) {
                projects.push(project(name));
            }
        }
    }
    for (source, target, weight) in edges {
        if let Some(record) = projects.iter_mut().find(|p| p.name == *source) {
            record.references.push(calls(target, *weight));
        }
    }
    ProjectDataset {
        semantic_analysis: true,
        projects,
    }
}

pub fn node(name: &str) -> ProjectNode {
    ProjectNode::new(name, name).unwrap()
}

/// Graph over nodes `0..size` named `P0..` with the given weighted edges
pub fn graph_from_edges(size: usize, edges: &[(usize, usize, u32)]) -> DependencyGraph {
    let mut graph = DependencyGraph::new();
    for i in 0..size {
        graph.add_project(node(&format!("P{}", i)));
    }
    for (source, target, weight) in edges {
        graph
            .add_dependency(
                &node(&format!("P{}", source)),
                &node(&format!("P{}", target)),
                ReferenceKind::Project,
                *weight,
            )
            .unwrap();
    }
    graph
}

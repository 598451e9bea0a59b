//! CSV exports for spreadsheets and migration tracking.
//!
//! Three tables: projects ranked by extraction difficulty, cycle-breaking
//! suggestions in rank order, and the edge-level dependency matrix.

use crate::core::{CycleBreakingSuggestion, CycleInfo};
use crate::graph::DependencyGraph;
use crate::scoring::{compare_scores, ExtractionScore};
use std::collections::HashMap;
use std::io::{self, Write};

/// Placeholder for a metric that could not be computed
pub const NOT_AVAILABLE: &str = "N/A";

/// Pure function: quote a field when it contains a delimiter, quote or newline
pub fn csv_field(text: &str) -> String {
    if text.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}

fn write_row<W: Write>(out: &mut W, fields: &[String]) -> io::Result<()> {
    let line: Vec<String> = fields.iter().map(|f| csv_field(f)).collect();
    writeln!(out, "{}", line.join(","))
}

fn format_metric(value: f64) -> String {
    format!("{:.1}", value)
}

/// Projects ordered from easiest to hardest to extract
pub fn write_extraction_scores<W: Write>(
    out: &mut W,
    scores: &[ExtractionScore],
) -> io::Result<()> {
    writeln!(
        out,
        "Project,Final Score,Coupling,Complexity,Tech Debt,External API Count"
    )?;

    let mut ordered: Vec<&ExtractionScore> = scores.iter().collect();
    ordered.sort_by(|a, b| compare_scores(a, b));

    for score in ordered {
        write_row(
            out,
            &[
                score.name().to_string(),
                format_metric(score.final_score),
                score
                    .coupling
                    .map(format_metric)
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                format_metric(score.complexity),
                format_metric(score.tech_debt),
                score.external_api_count.to_string(),
            ],
        )?;
    }
    Ok(())
}

/// Suggestions in rank order with their cycle's members
pub fn write_cycle_suggestions<W: Write>(
    out: &mut W,
    suggestions: &[CycleBreakingSuggestion],
    cycles: &[CycleInfo],
) -> io::Result<()> {
    writeln!(out, "Cycle ID,Cycle Size,Members,Break Point,Coupling Weight")?;

    let members: HashMap<usize, String> = cycles
        .iter()
        .map(|c| (c.id, c.member_names().join(", ")))
        .collect();

    let mut ordered: Vec<&CycleBreakingSuggestion> = suggestions.iter().collect();
    ordered.sort_by_key(|s| s.rank);

    for suggestion in ordered {
        write_row(
            out,
            &[
                suggestion.cycle_id.to_string(),
                suggestion.cycle_size.to_string(),
                members
                    .get(&suggestion.cycle_id)
                    .cloned()
                    .unwrap_or_default(),
                suggestion.edge.describe(),
                suggestion.coupling_weight().to_string(),
            ],
        )?;
    }
    Ok(())
}

/// Every edge, sorted by source then target name
pub fn write_dependency_matrix<W: Write>(out: &mut W, graph: &DependencyGraph) -> io::Result<()> {
    writeln!(out, "Source,Target,Kind,Coupling Weight")?;
    for edge in graph.sorted_edges() {
        write_row(
            out,
            &[
                edge.source.name().to_string(),
                edge.target.name().to_string(),
                edge.kind.to_string(),
                edge.coupling_weight.to_string(),
            ],
        )?;
    }
    Ok(())
}

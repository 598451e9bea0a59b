//! Terminal summary of an analysis run.

use crate::core::CycleBreakingSuggestion;
use crate::io::dot::HeatBand;
use crate::pipeline::AnalysisReport;
use crate::scoring::ExtractionScore;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, Color, ContentArrangement, Table};

/// Renders the overview, top suggestions and easiest candidates as text tables
#[derive(Debug, Clone)]
pub struct SummaryRenderer {
    top_n: usize,
    color: bool,
}

impl SummaryRenderer {
    pub fn new(top_n: usize, color: bool) -> Self {
        Self { top_n, color }
    }

    pub fn render(&self, report: &AnalysisReport) -> String {
        let mut out = String::new();

        out.push_str(&self.header("Dependency overview"));
        out.push_str(&self.overview_table(report).to_string());
        out.push('\n');

        let suggestions = report.top_suggestions(self.top_n);
        if suggestions.is_empty() {
            out.push_str(&self.success("No dependency cycles found"));
        } else {
            out.push_str(&self.header(&format!(
                "Top {} cycle-breaking suggestions",
                suggestions.len()
            )));
            out.push_str(&self.suggestion_table(suggestions).to_string());
            out.push('\n');
        }

        if !report.scores.is_empty() {
            let easiest = &report.scores[..self.top_n.min(report.scores.len())];
            out.push_str(&self.header("Easiest extraction candidates"));
            out.push_str(&self.score_table(easiest).to_string());
            out.push('\n');
        }

        if !report.warnings.is_empty() {
            out.push_str(&self.warning(&format!(
                "{} data-integrity warning(s); run with -v for details",
                report.warnings.len()
            )));
        }
        out
    }

    fn overview_table(&self, report: &AnalysisReport) -> Table {
        let summary = &report.summary;
        let mut table = self.table(&["Metric", "Value"]);
        let rows = [
            ("Projects", summary.project_count.to_string()),
            (
                "Dependencies",
                format!(
                    "{} ({} framework references filtered)",
                    report.graph.dependency_count(),
                    report.removed_edge_count
                ),
            ),
            ("Cycles", report.cycles.len().to_string()),
            (
                "Projects in cycles",
                format!(
                    "{} ({:.1}%)",
                    summary.projects_in_cycles, summary.cycle_participation
                ),
            ),
            ("Orphan projects", summary.orphan_count.to_string()),
            (
                "Cross-collection dependencies",
                summary.cross_collection_edges.to_string(),
            ),
        ];
        for (metric, value) in rows {
            table.add_row(vec![Cell::new(metric), Cell::new(value)]);
        }
        table
    }

    fn suggestion_table(&self, suggestions: &[CycleBreakingSuggestion]) -> Table {
        let mut table = self.table(&["Rank", "Cycle", "Size", "Break point", "Weight", "Rationale"]);
        for s in suggestions {
            table.add_row(vec![
                Cell::new(s.rank).set_alignment(CellAlignment::Right),
                Cell::new(s.cycle_id).set_alignment(CellAlignment::Right),
                Cell::new(s.cycle_size).set_alignment(CellAlignment::Right),
                Cell::new(s.edge.describe()),
                Cell::new(s.coupling_weight()).set_alignment(CellAlignment::Right),
                Cell::new(&s.rationale),
            ]);
        }
        table
    }

    fn score_table(&self, scores: &[ExtractionScore]) -> Table {
        let mut table = self.table(&["Project", "Score", "Coupling", "Complexity", "Tech debt"]);
        for score in scores {
            let mut score_cell =
                Cell::new(format!("{:.1}", score.final_score)).set_alignment(CellAlignment::Right);
            if self.color {
                score_cell = score_cell.fg(band_color(HeatBand::from_score(score.final_score)));
            }
            table.add_row(vec![
                Cell::new(score.name()),
                score_cell,
                Cell::new(
                    score
                        .coupling
                        .map(|c| format!("{:.1}", c))
                        .unwrap_or_else(|| "N/A".to_string()),
                ),
                Cell::new(format!("{:.1}", score.complexity)),
                Cell::new(format!("{:.1}", score.tech_debt)),
            ]);
        }
        table
    }

    fn table(&self, headers: &[&str]) -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);
        if !self.color {
            table.force_no_tty();
        }
        table.set_header(headers.to_vec());
        table
    }

    fn header(&self, text: &str) -> String {
        if self.color {
            format!("\n{}\n", text.bold().underline())
        } else {
            format!("\n{}\n", text)
        }
    }

    fn success(&self, text: &str) -> String {
        if self.color {
            format!("{}\n", text.green())
        } else {
            format!("{}\n", text)
        }
    }

    fn warning(&self, text: &str) -> String {
        if self.color {
            format!("{}\n", text.yellow())
        } else {
            format!("{}\n", text)
        }
    }
}

fn band_color(band: HeatBand) -> Color {
    match band {
        HeatBand::Easy => Color::Green,
        HeatBand::Medium => Color::Yellow,
        HeatBand::Hard => Color::Red,
    }
}

use crate::config::{load_config, DepmapConfig};
use crate::core::CancellationToken;
use crate::io::input::ProjectDataset;
use crate::io::terminal::SummaryRenderer;
use crate::pipeline::{AnalysisPipeline, AnalysisReport};
use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{info, warn};

pub const DOT_FILE: &str = "dependencies.dot";
pub const SCORES_FILE: &str = "extraction_scores.csv";
pub const SUGGESTIONS_FILE: &str = "cycle_suggestions.csv";
pub const MATRIX_FILE: &str = "dependency_matrix.csv";

pub struct AnalyzeConfig {
    pub dataset: PathBuf,
    pub config: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub top: Option<usize>,
    pub no_filter: bool,
    pub no_scores: bool,
    pub timeout: Option<Duration>,
    pub color: bool,
}

pub fn handle_analyze(options: AnalyzeConfig) -> Result<()> {
    let working_dir = std::env::current_dir().context("Failed to read working directory")?;
    let config = load_config(options.config.as_deref(), &working_dir)?;

    let dataset = ProjectDataset::load(&options.dataset)
        .with_context(|| format!("Failed to load dataset {}", options.dataset.display()))?;

    let report = run_with_timeout(&config, &dataset, options.no_filter, options.timeout)?;
    for warning in &report.warnings {
        warn!("{}", warning);
    }

    let mut visualization = config.visualization();
    if let Some(top) = options.top {
        visualization.top_n = top;
    }
    if options.no_scores {
        visualization.show_scores = false;
    }

    let written = write_reports(&report, &options.output_dir, &visualization)?;
    for path in &written {
        info!("Wrote {}", path.display());
    }

    let renderer = SummaryRenderer::new(visualization.top_n, options.color);
    print!("{}", renderer.render(&report));
    println!(
        "\nReports written to {} ({} files)",
        options.output_dir.display(),
        written.len()
    );
    Ok(())
}

/// Run the pipeline, cancelling it from a watchdog thread once `timeout`
/// elapses. The watchdog exits early when the run finishes first.
pub fn run_with_timeout(
    config: &DepmapConfig,
    dataset: &ProjectDataset,
    no_filter: bool,
    timeout: Option<Duration>,
) -> Result<AnalysisReport> {
    let mut pipeline = AnalysisPipeline::new(config)?;
    if no_filter {
        pipeline = pipeline.without_filter();
    }

    let token = CancellationToken::new();
    let watchdog = timeout.map(|limit| spawn_watchdog(token.clone(), limit));

    let result = pipeline.run(dataset, &token);

    if let Some((done, handle)) = watchdog {
        drop(done);
        if handle.join().is_err() {
            warn!("Timeout watchdog thread panicked");
        }
    }
    Ok(result?)
}

fn spawn_watchdog(token: CancellationToken, limit: Duration) -> (mpsc::Sender<()>, JoinHandle<()>) {
    let (done, finished) = mpsc::channel::<()>();
    let handle = thread::spawn(move || {
        if let Err(RecvTimeoutError::Timeout) = finished.recv_timeout(limit) {
            warn!("Analysis exceeded {:?}; cancelling", limit);
            token.cancel();
        }
    });
    (done, handle)
}

/// Write the DOT graph and the three CSV exports into `dir`
pub fn write_reports(
    report: &AnalysisReport,
    dir: &Path,
    visualization: &crate::config::VisualizationConfig,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let dot_path = dir.join(DOT_FILE);
    fs::write(&dot_path, report.to_dot(visualization))
        .with_context(|| format!("Failed to write {}", dot_path.display()))?;

    let scores = write_csv(dir, SCORES_FILE, |out| report.write_scores_csv(out))?;
    let suggestions = write_csv(dir, SUGGESTIONS_FILE, |out| report.write_suggestions_csv(out))?;
    let matrix = write_csv(dir, MATRIX_FILE, |out| report.write_matrix_csv(out))?;

    Ok(vec![dot_path, scores, suggestions, matrix])
}

fn write_csv<F>(dir: &Path, name: &str, write: F) -> Result<PathBuf>
where
    F: FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
{
    let path = dir.join(name);
    let file = File::create(&path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    write(&mut out).with_context(|| format!("Failed to write {}", path.display()))?;
    out.flush()
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

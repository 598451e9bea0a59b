use anyhow::Result;
use clap::Parser;
use depmap::cli::{Cli, Commands};
use depmap::commands::{self, AnalyzeConfig};
use std::io::IsTerminal;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Exit status for a run stopped by its timeout, distinct from failures
const EXIT_CANCELLED: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.command.verbosity());

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if is_cancelled(&err) => {
            eprintln!("Analysis cancelled: timeout reached before the run finished");
            ExitCode::from(EXIT_CANCELLED)
        }
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Analyze {
            dataset,
            config,
            output_dir,
            top,
            no_filter,
            no_scores,
            timeout_secs,
            plain,
            verbosity: _,
        } => commands::handle_analyze(AnalyzeConfig {
            dataset,
            config,
            output_dir,
            top,
            no_filter,
            no_scores,
            timeout: timeout_secs.map(Duration::from_secs),
            color: !plain && std::io::stdout().is_terminal(),
        }),
        Commands::Init { force } => commands::init_config(force),
    }
}

fn is_cancelled(err: &anyhow::Error) -> bool {
    err.downcast_ref::<depmap::Error>()
        .is_some_and(depmap::Error::is_cancelled)
}

/// `RUST_LOG` wins; otherwise the `-v` count picks the level.
/// Logs go to stderr so reports on stdout stay clean.
fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("depmap={}", default_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

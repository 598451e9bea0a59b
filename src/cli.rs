use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "depmap")]
#[command(
    about = "Project dependency analyzer: cycles, break points and extraction difficulty",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a project dataset and write graph and CSV reports
    Analyze {
        /// JSON dataset describing projects and their references
        dataset: PathBuf,

        /// Configuration file (defaults to the nearest .depmap.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Directory for dependencies.dot and the CSV exports
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Number of cycle-breaking suggestions to highlight and print
        #[arg(long = "top", visible_alias = "head")]
        top: Option<usize>,

        /// Keep framework references instead of filtering them
        #[arg(long = "no-filter")]
        no_filter: bool,

        /// Leave extraction scores out of node labels
        #[arg(long = "no-scores")]
        no_scores: bool,

        /// Cancel the analysis after this many seconds
        #[arg(long = "timeout-secs", env = "DEPMAP_TIMEOUT_SECS")]
        timeout_secs: Option<u64>,

        /// Plain output without colors
        #[arg(long)]
        plain: bool,

        /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Write a default .depmap.toml in the current directory
    Init {
        /// Overwrite an existing configuration file
        #[arg(short, long)]
        force: bool,
    },
}

impl Commands {
    pub fn verbosity(&self) -> u8 {
        match self {
            Self::Analyze { verbosity, .. } => *verbosity,
            Self::Init { .. } => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_analyze_flags() {
        let cli = Cli::parse_from([
            "depmap",
            "analyze",
            "projects.json",
            "--top",
            "5",
            "--no-filter",
            "-vv",
        ]);
        match cli.command {
            Commands::Analyze {
                dataset,
                top,
                no_filter,
                no_scores,
                verbosity,
                ..
            } => {
                assert_eq!(dataset, PathBuf::from("projects.json"));
                assert_eq!(top, Some(5));
                assert!(no_filter);
                assert!(!no_scores);
                assert_eq!(verbosity, 2);
            }
            Commands::Init { .. } => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_parse_init_force() {
        let cli = Cli::parse_from(["depmap", "init", "--force"]);
        assert!(matches!(cli.command, Commands::Init { force: true }));
    }
}

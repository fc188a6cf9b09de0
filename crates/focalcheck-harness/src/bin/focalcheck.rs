//! CLI entrypoint for the focalcheck suites.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use focalcheck_harness::structured_log::{ArtifactIndex, validate_log_file};
use focalcheck_harness::{HarnessConfig, HarnessError, SuiteRunner, report, suites};

/// Mock-driven checks for single library functions.
#[derive(Debug, Parser)]
#[command(name = "focalcheck")]
#[command(about = "Run focal-method suites with non-terminating checks")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List built-in suites and their scenarios.
    List,
    /// Run suites and print a summary. Exit code 1 if any check failed.
    Run {
        /// Suite to run (repeatable). Defaults to all suites.
        #[arg(long = "suite")]
        suites: Vec<String>,
        /// `suite::scenario` to report as skipped (repeatable).
        #[arg(long)]
        skip: Vec<String>,
        /// Print a line for every passing check.
        #[arg(long)]
        verbose: bool,
        /// Structured JSONL log path (overrides FOCALCHECK_LOG); `-` for stdout.
        #[arg(long)]
        log: Option<PathBuf>,
        /// Artifact index JSON path; needs a log.
        #[arg(long)]
        artifact_index: Option<PathBuf>,
        /// Fixed run id for reproducible logs.
        #[arg(long)]
        run_id: Option<String>,
    },
    /// Check a structured log against the line schema.
    ValidateLog {
        /// JSONL log path.
        #[arg(long)]
        log: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::List => {
            print!("{}", report::render_suite_list(&suites::all()));
        }
        Command::Run {
            suites: names,
            skip,
            verbose,
            log,
            artifact_index,
            run_id,
        } => {
            let config = HarnessConfig::from_env()
                .with_cli(verbose, log, artifact_index, names, run_id)
                .with_skips(skip);
            let selected = match suites::select(&config.suites) {
                Ok(selected) => selected,
                Err(err @ HarnessError::UnknownSuite(_)) => {
                    eprintln!("focalcheck: {err}");
                    std::process::exit(2);
                }
                Err(err) => return Err(err.into()),
            };

            if !config.logs_to_stdout()
                && let Some(parent) = config.log_path.as_deref().and_then(|p| p.parent())
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)?;
            }
            let mut runner = SuiteRunner::from_config(&config)?;
            let summary = runner.run(&selected)?;
            if config.logs_to_stdout() {
                eprint!("{}", report::render_summary(&summary));
            } else {
                print!("{}", report::render_summary(&summary));
            }

            match (&config.artifact_index, &config.log_path) {
                (Some(_), Some(_)) if config.logs_to_stdout() => {
                    eprintln!("focalcheck: --artifact-index ignored for a stdout log");
                }
                (Some(index_path), Some(log_path)) => {
                    let mut index = ArtifactIndex::new(&config.run_id);
                    index.add_file(log_path, "structured_log")?;
                    std::fs::write(index_path, index.to_json()?)?;
                    eprintln!("Wrote artifact index to {}", index_path.display());
                }
                (Some(_), None) => {
                    eprintln!("focalcheck: --artifact-index ignored without a log path");
                }
                _ => {}
            }

            std::process::exit(summary.exit_code());
        }
        Command::ValidateLog { log } => {
            let (lines, problems) = validate_log_file(&log)?;
            for problem in &problems {
                eprintln!("{problem}");
            }
            if !problems.is_empty() {
                eprintln!(
                    "focalcheck: {}",
                    HarnessError::InvalidLog {
                        path: log.display().to_string(),
                        problems: problems.len(),
                    }
                );
                std::process::exit(1);
            }
            println!("{}: {lines} line(s), schema OK", log.display());
        }
    }

    Ok(())
}

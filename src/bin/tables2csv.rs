use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use pdf_tables_to_csv::{Config, RunWarning, Scraper, write_results};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "tables2csv",
    version,
    about = "Download a PDF and export its titled tables as CSV files"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(long, alias = "config_file", default_value = "config.yml")]
    config_file: PathBuf,

    /// Directory under which the results subdirectory is created.
    #[arg(long, alias = "results_path", default_value = ".")]
    results_path: PathBuf,

    /// Print per-table skip reasons after the run.
    #[arg(short, long)]
    verbose: bool,
}

struct RunSummary {
    written: usize,
    warnings: Vec<RunWarning>,
}

fn run(cli: &Cli) -> Result<RunSummary> {
    let config = Config::load(&cli.config_file).with_context(|| {
        format!(
            "failed to load configuration from '{}'",
            cli.config_file.display()
        )
    })?;

    let mut scraper = Scraper::new(config)?;
    scraper.fetch().context("failed to download the PDF")?;
    let report = scraper
        .process()
        .context("failed to extract tables from the PDF")?;

    let (written, write_warnings) = write_results(&report, &cli.results_path);
    let mut warnings = report.warnings;
    warnings.extend(write_warnings);

    Ok(RunSummary { written, warnings })
}

fn log_summary(summary: &RunSummary, verbose: bool) {
    if summary.warnings.is_empty() {
        return;
    }

    eprintln!(
        "warning: {} table(s) skipped or failed",
        summary.warnings.len()
    );
    if verbose {
        for warning in &summary.warnings {
            eprintln!(
                "  - {:?} page={:?} title={:?}: {}",
                warning.code, warning.page, warning.title, warning.message
            );
        }
    }
}

fn main() -> ExitCode {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("pdf_tables_to_csv=info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(summary) => {
            log_summary(&summary, cli.verbose);
            if summary.written > 0 {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(2)
            }
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::from(1)
        }
    }
}

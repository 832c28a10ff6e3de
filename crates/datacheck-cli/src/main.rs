use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use datacheck_core::{Config, Status, TableKind};
use datacheck_engine::{run_checks, RunContext, RunOutcome};

/// Config file picked up from the working directory when `--config` is absent
const DEFAULT_CONFIG_FILE: &str = "datacheck.toml";

/// datacheck - data quality checks for customer, product and transaction exports
///
/// Runs every check once against the current files and writes a dated
/// report. Intended to be triggered daily by an external scheduler; a
/// non-zero exit means the run could not be completed.
#[derive(Parser)]
#[command(name = "datacheck")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file (default: datacheck.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding customers.csv, products.csv and transactions.csv
    #[arg(short, long)]
    data_path: Option<PathBuf>,

    /// Also write the report as JSON
    #[arg(short, long)]
    json: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let config = resolve_config(&cli)?;
    if cli.verbose {
        eprintln!("{} {}", "Reading inputs from:".cyan(), config.data_path.display());
    }

    // The one clock read of the run
    let ctx = RunContext::capture();

    let outcome = run_checks(&config, &ctx).with_context(|| {
        format!(
            "Data quality run aborted (inputs: {})",
            config.data_path.display()
        )
    })?;

    if let Some(json_path) = &cli.json {
        outcome
            .report
            .save_json(json_path)
            .with_context(|| format!("Failed to write JSON report to {}", json_path.display()))?;
        if cli.verbose {
            eprintln!("{} {}", "JSON report saved to:".green(), json_path.display());
        }
    }

    print_run_summary(&outcome);

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Defaults, then the config file, then the environment, then flags
fn resolve_config(cli: &Cli) -> Result<Config> {
    let config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            Config::from_file(Path::new(DEFAULT_CONFIG_FILE))
                .with_context(|| format!("Failed to load config {}", DEFAULT_CONFIG_FILE))?
        }
        None => {
            if cli.verbose {
                eprintln!("{}", "No config file found, using defaults".yellow());
            }
            Config::default()
        }
    };

    let config = apply_flags(config.with_env_overrides(), cli);
    tracing::debug!(
        data_path = %config.data_path.display(),
        reports_dir = %config.reports_dir.display(),
        delimiter = %config.delimiter,
        "Resolved configuration"
    );
    Ok(config)
}

fn apply_flags(mut config: Config, cli: &Cli) -> Config {
    if let Some(data_path) = &cli.data_path {
        config.data_path = data_path.clone();
    }
    config
}

/// Print a short summary of the run to stdout
fn print_run_summary(outcome: &RunOutcome) {
    let report = &outcome.report;

    println!("\n{}", "=".repeat(60).bright_blue());
    println!("{}", "Data Quality Check Report".bold().bright_blue());
    println!("{}", "=".repeat(60).bright_blue());
    println!();

    println!("Generated on: {}", report.timestamp());
    println!();

    println!("{}", "Summary:".bold());
    println!("  Checks:       {}", report.summary.checks);
    if report.summary.issues > 0 {
        println!("  Issues:       {}", report.summary.issues.to_string().red().bold());
    } else {
        println!("  Issues:       {}", report.summary.issues.to_string().green());
    }
    println!("  Passed:       {}", report.summary.passed);
    println!("  Flagged rows: {}", outcome.flagged_rows);
    println!();

    if !report.has_issues() {
        println!("{}", "✓ No critical data quality issues found!".green().bold());
    } else {
        for table in TableKind::ALL {
            let issues: Vec<_> = report
                .findings_for(table)
                .filter(|f| f.status == Status::Issue)
                .collect();
            if issues.is_empty() {
                continue;
            }

            println!("{}", table.section_title().bold());
            for finding in issues {
                println!("  {} {}", "[!]".red(), finding.message);
            }
        }
    }

    println!();
    println!("[+] Report generated: {}", outcome.report_path.display());
    match &outcome.flagged_path {
        Some(path) => println!("[+] Flagged rows exported to: {}", path.display()),
        None => println!("[+] No rows flagged, no export written"),
    }
    println!("{}", "=".repeat(60).bright_blue());
}

//! One complete validation run
//!
//! Load everything, evaluate everything, render both artifacts, then write
//! them. A run that fails leaves no report or export behind.

use datacheck_core::{Config, Dataset, QualityReport};
use datacheck_loader::{load_dataset, CsvSource, TableSource};
use std::path::PathBuf;

use crate::error::EngineError;
use crate::flagged::{write_export, FlaggedRowSet};
use crate::rule_set::{RuleSet, RunContext};

/// Findings and flagged rows for one snapshot, before anything is written
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub report: QualityReport,
    pub flagged: FlaggedRowSet,
}

/// What a finished run produced
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub report: QualityReport,

    /// Text report written for this run
    pub report_path: PathBuf,

    /// Export file, when any row was flagged
    pub flagged_path: Option<PathBuf>,

    pub flagged_rows: usize,
}

/// Evaluate the rule set against a loaded snapshot; no I/O
pub fn evaluate(dataset: &Dataset, ctx: &RunContext) -> Result<Evaluation, EngineError> {
    let findings = RuleSet::new().evaluate(dataset, ctx)?;
    let flagged = FlaggedRowSet::from_findings(&findings, dataset);
    let report = QualityReport::from_findings(findings, ctx.now);

    Ok(Evaluation { report, flagged })
}

/// Run against the delimited files named by `config`
pub fn run_checks(config: &Config, ctx: &RunContext) -> Result<RunOutcome, EngineError> {
    let source = CsvSource::from_config(config)?;
    run_with_source(&source, config, ctx)
}

/// Run against any table source, writing outputs where `config` says
pub fn run_with_source(
    source: &dyn TableSource,
    config: &Config,
    ctx: &RunContext,
) -> Result<RunOutcome, EngineError> {
    let loaded = load_dataset(source)?;

    tracing::info!(
        customers = loaded.dataset.customers.len(),
        products = loaded.dataset.products.len(),
        transactions = loaded.dataset.transactions.len(),
        "Running data quality checks"
    );

    let Evaluation { report, flagged } = evaluate(&loaded.dataset, ctx)?;
    let report = report.with_metadata(loaded.metadata());

    // Both artifacts are rendered before anything touches the filesystem
    let export = flagged
        .render()
        .map_err(|e| EngineError::write(&config.flagged_output, e))?;

    let report_path = report
        .save_text(&config.reports_dir)
        .map_err(|e| EngineError::write(config.reports_dir.join(report.file_name()), e))?;

    let flagged_path = match export {
        Some(contents) => {
            if let Err(err) = write_export(&config.flagged_output, &contents) {
                // A failed run leaves no report behind
                if let Err(e) = std::fs::remove_file(&report_path) {
                    tracing::warn!(path = %report_path.display(), error = %e, "Could not remove report");
                }
                return Err(err);
            }
            Some(config.flagged_output.clone())
        }
        None => None,
    };

    tracing::info!(path = %report_path.display(), issues = report.summary.issues, "Report generated");
    match &flagged_path {
        Some(path) => tracing::info!(path = %path.display(), rows = flagged.len(), "Flagged rows exported"),
        None => tracing::info!("No rows flagged, export skipped"),
    }

    Ok(RunOutcome {
        report,
        report_path,
        flagged_path,
        flagged_rows: flagged.len(),
    })
}

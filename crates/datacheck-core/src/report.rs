//! Quality report
//!
//! The text rendering is what operators read; the JSON form is STABLE and
//! VERSIONED like any other machine-readable output.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use crate::finding::Finding;
use crate::table::{TableKind, DATETIME_FORMAT};

/// Report schema version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportVersion {
    /// Major version (breaking changes)
    pub major: u32,

    /// Minor version (backward-compatible additions)
    pub minor: u32,
}

impl ReportVersion {
    /// Current report schema version
    pub const CURRENT: ReportVersion = ReportVersion { major: 1, minor: 0 };
}

impl std::fmt::Display for ReportVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Summary statistics for a report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Number of findings (one per check line)
    pub checks: usize,

    /// Findings marked as issues
    pub issues: usize,

    /// Findings that passed
    pub passed: usize,

    /// Rows contributed to the flagged-row export
    pub flagged_rows: usize,
}

/// Data quality report for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    /// Schema version
    pub version: ReportVersion,

    /// Run start time (local)
    pub generated_at: NaiveDateTime,

    /// Summary statistics
    pub summary: ReportSummary,

    /// Findings in evaluation order
    pub findings: Vec<Finding>,

    /// Metadata (input fingerprints and the like)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl QualityReport {
    /// Build a report from findings in evaluation order
    pub fn from_findings(findings: Vec<Finding>, generated_at: NaiveDateTime) -> Self {
        let issues = findings.iter().filter(|f| f.is_issue()).count();
        let flagged_rows = findings
            .iter()
            .filter(|f| f.is_issue())
            .map(|f| f.rows.len())
            .sum();

        let summary = ReportSummary {
            checks: findings.len(),
            issues,
            passed: findings.len() - issues,
            flagged_rows,
        };

        Self {
            version: ReportVersion::CURRENT,
            generated_at,
            summary,
            findings,
            metadata: None,
        }
    }

    /// Attach metadata
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn has_issues(&self) -> bool {
        self.summary.issues > 0
    }

    /// Findings for one table, in evaluation order
    pub fn findings_for(&self, table: TableKind) -> impl Iterator<Item = &Finding> + '_ {
        self.findings.iter().filter(move |f| f.table == table)
    }

    /// Issue findings in report order
    pub fn issues(&self) -> impl Iterator<Item = &Finding> + '_ {
        TableKind::ALL
            .into_iter()
            .flat_map(move |table| self.findings_for(table))
            .filter(|f| f.is_issue())
    }

    /// Generation time as printed in the header
    pub fn timestamp(&self) -> String {
        self.generated_at.format(DATETIME_FORMAT).to_string()
    }

    /// Report file name for this run's date
    pub fn file_name(&self) -> String {
        format!("quality_check_{}.txt", self.generated_at.format("%Y_%m_%d"))
    }

    /// Render the human-readable report
    ///
    /// Sections follow `TableKind::ALL`; the summary repeats every issue
    /// line verbatim.
    pub fn render_text(&self) -> String {
        let mut lines: Vec<String> = Vec::new();

        lines.push("DATA QUALITY ISSUES REPORT".to_string());
        lines.push("=".repeat(27));
        lines.push(String::new());
        lines.push(format!("Generated on: {}", self.timestamp()));
        lines.push(String::new());
        lines.push("The following data quality checks were performed:".to_string());

        for table in TableKind::ALL {
            lines.push(String::new());
            lines.push(table.section_title().to_string());
            lines.extend(self.findings_for(table).map(Finding::render_line));
        }

        lines.push(String::new());
        lines.push("Summary of Issues Found:".to_string());

        let summary: Vec<String> = self.issues().map(Finding::render_line).collect();
        if summary.is_empty() {
            lines.push("  No critical data quality issues found.".to_string());
        } else {
            lines.extend(summary);
        }

        let mut text = lines.join("\n");
        text.push('\n');
        text
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write the text report into `dir`, creating it if needed
    ///
    /// Returns the path written.
    pub fn save_text(&self, dir: &std::path::Path) -> Result<std::path::PathBuf, std::io::Error> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(self.file_name());
        std::fs::write(&path, self.render_text())?;
        Ok(path)
    }

    /// Save JSON to file
    pub fn save_json(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let json = self.to_json()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        std::fs::write(path, json)
    }
}

//! Flagged-row export
//!
//! Collects the offending rows of every failing check into one table. Rows
//! keep evaluation order and are never deduplicated: a row caught by two
//! checks appears twice, once per check.

use datacheck_core::{CheckCode, Dataset, Finding, TableKind, Value};
use std::io::Write;
use std::path::Path;

use crate::error::EngineError;

/// Leading columns identifying where each exported row came from
pub const TAG_COLUMNS: [&str; 2] = ["source_table", "check"];

/// One exported row, cells aligned with [`FlaggedRowSet::columns`]
#[derive(Debug, Clone, PartialEq)]
pub struct FlaggedRow {
    pub table: TableKind,
    pub code: CheckCode,
    pub cells: Vec<Value>,
}

/// Outer union of all flagged rows across tables
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlaggedRowSet {
    /// Data columns in first-seen order
    pub columns: Vec<String>,

    pub rows: Vec<FlaggedRow>,
}

impl FlaggedRowSet {
    /// Gather rows from the failing findings
    ///
    /// `dataset` supplies each table's header; columns a table lacks are
    /// null in its rows.
    pub fn from_findings(findings: &[Finding], dataset: &Dataset) -> Self {
        let contributing: Vec<&Finding> = findings
            .iter()
            .filter(|f| f.is_issue() && !f.rows.is_empty())
            .collect();

        let mut columns: Vec<String> = Vec::new();
        for finding in &contributing {
            for column in &dataset.table(finding.table).columns {
                if !columns.contains(column) {
                    columns.push(column.clone());
                }
            }
        }

        let mut rows = Vec::new();
        for finding in contributing {
            let header = &dataset.table(finding.table).columns;
            let positions: Vec<Option<usize>> = columns
                .iter()
                .map(|column| header.iter().position(|c| c == column))
                .collect();

            for row in &finding.rows {
                let cells = positions
                    .iter()
                    .map(|position| {
                        position
                            .and_then(|index| row.get(index))
                            .cloned()
                            .unwrap_or(Value::Null)
                    })
                    .collect();

                rows.push(FlaggedRow {
                    table: finding.table,
                    code: finding.code,
                    cells,
                });
            }
        }

        Self { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Write as comma-separated text with a header row
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut writer = csv::Writer::from_writer(writer);

        let header = TAG_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .chain(self.columns.iter().cloned());
        writer.write_record(header)?;

        for row in &self.rows {
            let record = [row.table.to_string(), row.code.to_string()]
                .into_iter()
                .chain(row.cells.iter().map(Value::to_string));
            writer.write_record(record)?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Render to a string
    pub fn to_csv_string(&self) -> Result<String, csv::Error> {
        let mut buffer = Vec::new();
        self.write_csv(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    /// Render the export, or `None` when nothing was flagged
    pub fn render(&self) -> Result<Option<String>, csv::Error> {
        if self.is_empty() {
            return Ok(None);
        }
        self.to_csv_string().map(Some)
    }

    /// Write the export to `path`
    ///
    /// An empty set writes nothing and returns `false`; an existing file at
    /// `path` is left untouched in that case.
    pub fn save(&self, path: &Path) -> Result<bool, EngineError> {
        match self.render().map_err(|e| EngineError::write(path, e))? {
            Some(contents) => {
                write_export(path, &contents)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Write already rendered export contents, creating the parent directory
pub(crate) fn write_export(path: &Path, contents: &str) -> Result<(), EngineError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| EngineError::write(parent, e))?;
    }
    std::fs::write(path, contents).map_err(|e| EngineError::write(path, e))
}

//! Table source trait for supplying the three input tables

use datacheck_core::{Table, TableKind};
use std::path::PathBuf;

/// Errors that can occur when loading tables
///
/// Every variant is a data-shape error: the run cannot produce a
/// trustworthy report and must abort.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Input file for {table} not found: {path}")]
    FileNotFound { table: TableKind, path: PathBuf },

    #[error("Failed to read {path}: {message}")]
    Io { path: PathBuf, message: String },

    #[error("Malformed {table} data: {message}")]
    Malformed { table: TableKind, message: String },

    #[error("Table {table} is missing required column(s): {}", columns.join(", "))]
    MissingColumns { table: TableKind, columns: Vec<String> },

    #[error("Source '{source_name}' has no {table} table")]
    NotProvided { source_name: &'static str, table: TableKind },

    #[error("Invalid delimiter {0:?}")]
    InvalidDelimiter(char),
}

/// A table together with where it came from
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedTable {
    pub table: Table,

    /// File path or other human-readable origin
    pub location: String,

    /// SHA-256 of the raw input bytes, when the source has any
    pub sha256: Option<String>,
}

impl LoadedTable {
    pub fn new(table: Table, location: impl Into<String>) -> Self {
        Self {
            table,
            location: location.into(),
            sha256: None,
        }
    }

    pub fn with_sha256(mut self, digest: String) -> Self {
        self.sha256 = Some(digest);
        self
    }
}

/// Anything that can hand the engine a full table
pub trait TableSource {
    /// Source name for logs (e.g., "csv", "memory")
    fn name(&self) -> &'static str;

    /// Load one table completely into memory
    fn load_table(&self, kind: TableKind) -> Result<LoadedTable, LoadError>;
}

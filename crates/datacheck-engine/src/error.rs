//! Engine errors
//!
//! Only data-shape problems are errors. Bad data is reported as findings.

use datacheck_core::{CheckCode, TableKind};
use datacheck_loader::LoadError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("Column '{column}' needed by {check} is missing from {table}")]
    MissingColumn {
        table: TableKind,
        column: String,
        check: CheckCode,
    },

    #[error("Failed to write {path}: {message}")]
    Write { path: PathBuf, message: String },
}

impl EngineError {
    pub(crate) fn write(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        Self::Write {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

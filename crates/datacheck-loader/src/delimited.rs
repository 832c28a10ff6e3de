//! Delimited-file table source
//!
//! Reads `<data_path>/<table>.csv` with a header row. Short records are
//! padded with nulls; records longer than the header are malformed.

use crate::coerce::coerce_cell;
use crate::source::{LoadError, LoadedTable, TableSource};
use datacheck_core::{validate_delimiter, ColumnKind, Config, Row, Table, TableKind, Value};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// Table source backed by delimited files in one directory
#[derive(Debug, Clone)]
pub struct CsvSource {
    data_path: PathBuf,
    delimiter: u8,
    null_tokens: Vec<String>,
}

impl CsvSource {
    /// Create a source reading from `data_path` with the given delimiter
    pub fn new(data_path: impl Into<PathBuf>, delimiter: char) -> Result<Self, LoadError> {
        validate_delimiter(delimiter).map_err(|_| LoadError::InvalidDelimiter(delimiter))?;

        Ok(Self {
            data_path: data_path.into(),
            delimiter: delimiter as u8,
            null_tokens: datacheck_core::config::DEFAULT_NULL_TOKENS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        })
    }

    /// Create a source from the run configuration
    pub fn from_config(config: &Config) -> Result<Self, LoadError> {
        Ok(Self::new(&config.data_path, config.delimiter)?.with_null_tokens(config.null_tokens.clone()))
    }

    /// Replace the set of cell contents read as null
    pub fn with_null_tokens(mut self, tokens: Vec<String>) -> Self {
        self.null_tokens = tokens;
        self
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    /// Parse raw delimited bytes into a table
    pub fn parse(&self, kind: TableKind, bytes: &[u8]) -> Result<Table, LoadError> {
        let malformed = |e: csv::Error| LoadError::Malformed {
            table: kind,
            message: e.to_string(),
        };

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(bytes);

        let columns: Vec<String> = reader
            .headers()
            .map_err(malformed)?
            .iter()
            .map(|h| h.to_string())
            .collect();

        let kinds: Vec<ColumnKind> = columns.iter().map(|c| kind.column_kind(c)).collect();
        let mut table = Table::new(kind, columns);
        let mut coerced_dates = 0usize;

        for (index, record) in reader.records().enumerate() {
            let record = record.map_err(malformed)?;

            if record.len() > kinds.len() {
                return Err(LoadError::Malformed {
                    table: kind,
                    message: format!(
                        "record {} has {} fields, header has {}",
                        index + 1,
                        record.len(),
                        kinds.len()
                    ),
                });
            }

            let mut cells = Vec::with_capacity(kinds.len());
            for (col, column_kind) in kinds.iter().enumerate() {
                let raw = record.get(col);
                let value = match raw {
                    Some(raw) => coerce_cell(raw, *column_kind, &self.null_tokens),
                    None => Value::Null,
                };

                if *column_kind == ColumnKind::DateTime && value.is_null() {
                    if let Some(raw) = raw.filter(|r| !self.null_tokens.iter().any(|t| t == r)) {
                        coerced_dates += 1;
                        tracing::debug!(table = %kind, record = index + 1, raw, "Unparsable date coerced to null");
                    }
                }

                cells.push(value);
            }

            table.push_row(Row::new(cells));
        }

        if coerced_dates > 0 {
            tracing::warn!(table = %kind, count = coerced_dates, "Unparsable dates coerced to null");
        }

        Ok(table)
    }
}

impl TableSource for CsvSource {
    fn name(&self) -> &'static str {
        "csv"
    }

    fn load_table(&self, kind: TableKind) -> Result<LoadedTable, LoadError> {
        let path = self.data_path.join(kind.file_name());

        if !path.is_file() {
            return Err(LoadError::FileNotFound { table: kind, path });
        }

        let bytes = std::fs::read(&path).map_err(|e| LoadError::Io {
            path: path.clone(),
            message: e.to_string(),
        })?;

        let table = self.parse(kind, &bytes)?;
        tracing::debug!(table = %kind, rows = table.len(), path = %path.display(), "Loaded table");

        let digest = hex::encode(Sha256::digest(&bytes));
        Ok(LoadedTable::new(table, path.display().to_string()).with_sha256(digest))
    }
}

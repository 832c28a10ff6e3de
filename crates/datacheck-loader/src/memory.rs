//! In-memory table source
//!
//! Returns predefined tables without touching the filesystem. Useful for
//! unit tests of the rule set and for embedding the engine where the tables
//! are already in memory.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use datacheck_loader::{MemorySource, load_dataset};
//!
//! let source = MemorySource::new()
//!     .with_table(customers)
//!     .with_table(products)
//!     .with_table(transactions);
//!
//! let loaded = load_dataset(&source)?;
//! ```

use crate::source::{LoadError, LoadedTable, TableSource};
use datacheck_core::{Dataset, Table, TableKind};
use std::collections::HashMap;

/// Table source holding tables in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    tables: HashMap<TableKind, Table>,
}

impl MemorySource {
    /// Create a source with no tables
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table under its own kind, replacing any previous one
    pub fn with_table(mut self, table: Table) -> Self {
        self.insert(table);
        self
    }

    pub fn insert(&mut self, table: Table) {
        self.tables.insert(table.kind, table);
    }

    /// Create a source serving every table of a dataset
    pub fn from_dataset(dataset: Dataset) -> Self {
        Self::new()
            .with_table(dataset.customers)
            .with_table(dataset.products)
            .with_table(dataset.transactions)
    }

    /// Number of registered tables
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }
}

impl TableSource for MemorySource {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn load_table(&self, kind: TableKind) -> Result<LoadedTable, LoadError> {
        self.tables
            .get(&kind)
            .cloned()
            .map(|table| LoadedTable::new(table, format!("memory:{}", kind)))
            .ok_or(LoadError::NotProvided {
                source_name: self.name(),
                table: kind,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serves_registered_tables() {
        let source = MemorySource::new()
            .with_table(Table::new(TableKind::Products, vec!["product_id".into(), "price".into()]));

        assert_eq!(source.table_count(), 1);
        let loaded = source.load_table(TableKind::Products).unwrap();
        assert_eq!(loaded.location, "memory:products");
        assert!(loaded.sha256.is_none());
    }

    #[test]
    fn unregistered_table_is_an_error() {
        let source = MemorySource::new();
        let err = source.load_table(TableKind::Customers).unwrap_err();

        assert!(matches!(err, LoadError::NotProvided { table: TableKind::Customers, .. }));
    }

    #[test]
    fn later_registration_replaces_earlier() {
        let source = MemorySource::new()
            .with_table(Table::new(TableKind::Customers, vec!["a".into()]))
            .with_table(Table::new(TableKind::Customers, vec!["email".into()]));

        let loaded = source.load_table(TableKind::Customers).unwrap();
        assert_eq!(loaded.table.columns, vec!["email"]);
    }
}

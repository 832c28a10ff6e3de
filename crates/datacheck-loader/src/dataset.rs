//! Loading the full three-table snapshot

use crate::source::{LoadError, TableSource};
use datacheck_core::{Dataset, Table, TableKind};
use serde::Serialize;

/// Where one input came from, recorded in report metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputInfo {
    pub table: TableKind,
    pub location: String,
    pub rows: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
}

/// All three tables plus their provenance
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub dataset: Dataset,
    pub inputs: Vec<InputInfo>,
}

impl LoadedDataset {
    /// Metadata block for the JSON report
    pub fn metadata(&self) -> serde_json::Value {
        serde_json::json!({ "inputs": self.inputs })
    }
}

/// Load all three tables and check their required columns
///
/// Nothing is returned until every table is loaded and shaped correctly, so
/// no check ever runs against a partial snapshot.
pub fn load_dataset(source: &dyn TableSource) -> Result<LoadedDataset, LoadError> {
    tracing::info!(source = source.name(), "Loading input tables");

    let mut inputs = Vec::with_capacity(TableKind::ALL.len());
    let customers = load_checked(source, TableKind::Customers, &mut inputs)?;
    let products = load_checked(source, TableKind::Products, &mut inputs)?;
    let transactions = load_checked(source, TableKind::Transactions, &mut inputs)?;

    Ok(LoadedDataset {
        dataset: Dataset {
            customers,
            products,
            transactions,
        },
        inputs,
    })
}

fn load_checked(
    source: &dyn TableSource,
    kind: TableKind,
    inputs: &mut Vec<InputInfo>,
) -> Result<Table, LoadError> {
    let loaded = source.load_table(kind)?;
    let mut table = loaded.table;
    table.kind = kind;

    let missing = table.missing_required_columns();
    if !missing.is_empty() {
        return Err(LoadError::MissingColumns {
            table: kind,
            columns: missing.into_iter().map(String::from).collect(),
        });
    }

    inputs.push(InputInfo {
        table: kind,
        location: loaded.location,
        rows: table.len(),
        sha256: loaded.sha256,
    });

    Ok(table)
}

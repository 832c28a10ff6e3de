//! Table model and the canonical cell value type

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Format used when rendering date/time cells
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single typed cell
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Empty or null-token cell
    Null,

    /// Free text
    Text(String),

    /// Finite numeric value
    Number(f64),

    /// Parsed date/time (local, no offset)
    DateTime(NaiveDateTime),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Self::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Type-tagged key used for equality across rows
    ///
    /// Two cells are considered equal by the duplicate and membership checks
    /// exactly when their canonical keys are equal. `-0` and `0` collapse.
    pub fn canonical(&self) -> String {
        match self {
            Self::Null => "null:".to_string(),
            Self::Text(s) => format!("text:{}", s),
            Self::Number(n) if *n == 0.0 => "num:0".to_string(),
            Self::Number(n) => format!("num:{}", n),
            Self::DateTime(dt) => format!("dt:{}", dt.format("%Y-%m-%dT%H:%M:%S%.f")),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Text(s) => write!(f, "{}", s),
            Self::Number(n) => write!(f, "{}", n),
            Self::DateTime(dt) => write!(f, "{}", dt.format(DATETIME_FORMAT)),
        }
    }
}

/// How a column's raw text is coerced on load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Number,
    DateTime,
}

/// The three datasets under validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableKind {
    Customers,
    Products,
    Transactions,
}

impl TableKind {
    /// Report and evaluation order
    pub const ALL: [TableKind; 3] = [Self::Customers, Self::Products, Self::Transactions];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Customers => "customers",
            Self::Products => "products",
            Self::Transactions => "transactions",
        }
    }

    /// Source file name under the data directory
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Customers => "customers.csv",
            Self::Products => "products.csv",
            Self::Transactions => "transactions.csv",
        }
    }

    /// Heading of this table's report section
    pub fn section_title(&self) -> &'static str {
        match self {
            Self::Customers => "Customer Table Checks:",
            Self::Products => "Product Table Checks:",
            Self::Transactions => "Transaction Table Checks:",
        }
    }

    /// Columns the checks depend on; a file without them cannot be validated
    pub fn required_columns(&self) -> &'static [&'static str] {
        match self {
            Self::Customers => &["email"],
            Self::Products => &["product_id", "price"],
            Self::Transactions => &["transaction_date", "amount", "product_id"],
        }
    }

    /// Fixed column typing; anything not listed is text
    pub fn column_kind(&self, column: &str) -> ColumnKind {
        match (self, column) {
            (Self::Products, "product_id" | "price") => ColumnKind::Number,
            (Self::Transactions, "product_id" | "amount") => ColumnKind::Number,
            (Self::Transactions, "transaction_date") => ColumnKind::DateTime,
            _ => ColumnKind::Text,
        }
    }
}

impl std::fmt::Display for TableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One row, cells aligned with the owning table's columns
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub cells: Vec<Value>,
}

impl Row {
    pub fn new(cells: Vec<Value>) -> Self {
        Self { cells }
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.cells.get(index)
    }

    /// SHA-256 over the canonical keys of every cell (hex)
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for cell in &self.cells {
            let key = cell.canonical();
            hasher.update((key.len() as u64).to_le_bytes());
            hasher.update(key.as_bytes());
        }
        hex::encode(hasher.finalize())
    }
}

/// A named, ordered collection of rows
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub kind: TableKind,
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    /// Create an empty table with the given header
    pub fn new(kind: TableKind, columns: Vec<String>) -> Self {
        Self {
            kind,
            columns,
            rows: Vec::new(),
        }
    }

    /// Create a table from a header and rows
    pub fn with_rows(kind: TableKind, columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { kind, columns, rows }
    }

    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column in the header
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Required columns absent from the header
    pub fn missing_required_columns(&self) -> Vec<&'static str> {
        self.kind
            .required_columns()
            .iter()
            .copied()
            .filter(|col| self.column_index(col).is_none())
            .collect()
    }

    /// Iterate the cells of one column, `Null` for short rows
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &Value> + '_ {
        self.rows
            .iter()
            .map(move |row| row.get(index).unwrap_or(&Value::Null))
    }
}

/// Snapshot of all three tables for one run
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub customers: Table,
    pub products: Table,
    pub transactions: Table,
}

impl Dataset {
    pub fn table(&self, kind: TableKind) -> &Table {
        match kind {
            TableKind::Customers => &self.customers,
            TableKind::Products => &self.products,
            TableKind::Transactions => &self.transactions,
        }
    }

    /// Tables in report order
    pub fn tables(&self) -> impl Iterator<Item = &Table> + '_ {
        TableKind::ALL.into_iter().map(move |kind| self.table(kind))
    }
}

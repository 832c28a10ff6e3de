//! Check codes and findings
//!
//! Check codes appear in the JSON report and in the flagged-row export.
//! NEVER rename codes - downstream consumers filter on them.

use serde::{Deserialize, Serialize};
use crate::table::{Row, TableKind};

/// Check code registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckCode {
    /// Null or empty cells in a column
    MissingValues,

    /// Rows whose every cell equals another row
    DuplicateRows,

    /// Email not matching the address pattern
    InvalidEmail,

    /// Transaction amount zero or below
    NonPositiveAmount,

    /// Transaction dated after the run started
    FutureDate,

    /// Transaction date absent or unparsable
    MissingDate,

    /// Transaction product_id not present in products
    InvalidProductReference,

    /// Product price absent or zero
    MissingOrZeroPrice,

    /// Product ids not starting at 1
    ProductIdStart,
}

impl CheckCode {
    /// Get the check code as a stable string identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingValues => "MISSING_VALUES",
            Self::DuplicateRows => "DUPLICATE_ROWS",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::NonPositiveAmount => "NON_POSITIVE_AMOUNT",
            Self::FutureDate => "FUTURE_DATE",
            Self::MissingDate => "MISSING_DATE",
            Self::InvalidProductReference => "INVALID_PRODUCT_REFERENCE",
            Self::MissingOrZeroPrice => "MISSING_OR_ZERO_PRICE",
            Self::ProductIdStart => "PRODUCT_ID_START",
        }
    }
}

impl std::fmt::Display for CheckCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of one check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Ok,
    Issue,
}

impl Status {
    pub fn from_issue(found: bool) -> Self {
        if found {
            Self::Issue
        } else {
            Self::Ok
        }
    }

    /// Marker printed in front of a report line
    pub fn marker(&self) -> &'static str {
        match self {
            Self::Ok => "[✓]",
            Self::Issue => "[!]",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ok => write!(f, "ok"),
            Self::Issue => write!(f, "issue"),
        }
    }
}

/// Result of one check applied to one table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// Table the check ran against
    pub table: TableKind,

    /// Stable check code
    pub code: CheckCode,

    pub status: Status,

    /// Human-readable message, without marker
    pub message: String,

    /// The count the message reports
    pub count: usize,

    /// Offending rows, in table order
    #[serde(skip)]
    pub rows: Vec<Row>,
}

impl Finding {
    /// A count-based finding: an issue whenever `count > 0`
    pub fn counted(table: TableKind, code: CheckCode, message: impl Into<String>, count: usize) -> Self {
        Self {
            table,
            code,
            status: Status::from_issue(count > 0),
            message: message.into(),
            count,
            rows: Vec::new(),
        }
    }

    /// A finding with an explicit status and no rows
    pub fn with_status(table: TableKind, code: CheckCode, status: Status, message: impl Into<String>) -> Self {
        Self {
            table,
            code,
            status,
            message: message.into(),
            count: 0,
            rows: Vec::new(),
        }
    }

    /// Attach the offending rows
    pub fn with_rows(mut self, rows: Vec<Row>) -> Self {
        self.rows = rows;
        self
    }

    pub fn is_issue(&self) -> bool {
        self.status == Status::Issue
    }

    /// The report line for this finding
    pub fn render_line(&self) -> String {
        format!("  {}  {}", self.status.marker(), self.message)
    }
}

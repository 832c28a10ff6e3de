//! datacheck core
//!
//! Domain model shared by the loader, engine and binary.
//! Never rename check codes - they are part of the report format.

pub mod table;
pub mod finding;
pub mod report;
pub mod config;

pub use table::{Value, Row, Table, TableKind, ColumnKind, Dataset, DATETIME_FORMAT};
pub use finding::{Finding, CheckCode, Status};
pub use report::{QualityReport, ReportSummary, ReportVersion};
pub use config::{validate_delimiter, Config, ConfigError};

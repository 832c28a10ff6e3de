//! Table loading for the validation engine
//!
//! Every input is read completely into memory before any check runs. The
//! `TableSource` trait is the boundary: `CsvSource` reads semicolon-delimited
//! files, `MemorySource` serves tables built in code.
//!
//! ## Example
//!
//! ```rust,ignore
//! use datacheck_core::Config;
//! use datacheck_loader::{CsvSource, load_dataset};
//!
//! let source = CsvSource::from_config(&Config::default())?;
//! let loaded = load_dataset(&source)?;
//! println!("{} transactions", loaded.dataset.transactions.len());
//! ```

pub mod source;
pub mod coerce;
pub mod delimited;
pub mod memory;
pub mod dataset;

pub use source::{TableSource, LoadedTable, LoadError};
pub use delimited::CsvSource;
pub use memory::MemorySource;
pub use dataset::{load_dataset, LoadedDataset, InputInfo};

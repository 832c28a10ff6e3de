//! datacheck engine - rule evaluation and reporting
//!
//! This crate implements the validation engine:
//! - Data quality checks over customers, products and transactions
//! - The fixed evaluation order of those checks
//! - Flagged-row export
//! - The single-run entry point

pub mod error;
pub mod rules;
pub mod rule_set;
pub mod flagged;
pub mod run;

pub use error::EngineError;
pub use rule_set::{Check, RuleSet, RunContext, CHECKS};
pub use flagged::{FlaggedRow, FlaggedRowSet};
pub use run::{evaluate, run_checks, run_with_source, Evaluation, RunOutcome};

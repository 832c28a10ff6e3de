//! The fixed, ordered battery of checks

use chrono::{Local, NaiveDateTime};
use datacheck_core::{CheckCode, Dataset, Finding, TableKind};

use crate::error::EngineError;
use crate::rules;

/// Values shared by every check in one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunContext {
    /// Cutoff for the future-date check and the report timestamp
    pub now: NaiveDateTime,
}

impl RunContext {
    pub fn new(now: NaiveDateTime) -> Self {
        Self { now }
    }

    /// Read the local wall clock once
    pub fn capture() -> Self {
        Self::new(Local::now().naive_local())
    }
}

/// One entry of the rule set: a check bound to the table(s) it reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    MissingValues(TableKind),
    DuplicateRows(TableKind),
    InvalidEmails,
    MissingOrZeroPrices,
    ProductIdStart,
    NonPositiveAmounts,
    FutureDates,
    MissingDates,
    InvalidProductReferences,
}

impl Check {
    /// Table whose report section the findings belong to
    pub fn table(&self) -> TableKind {
        match self {
            Self::MissingValues(kind) | Self::DuplicateRows(kind) => *kind,
            Self::InvalidEmails => TableKind::Customers,
            Self::MissingOrZeroPrices | Self::ProductIdStart => TableKind::Products,
            Self::NonPositiveAmounts
            | Self::FutureDates
            | Self::MissingDates
            | Self::InvalidProductReferences => TableKind::Transactions,
        }
    }

    pub fn code(&self) -> CheckCode {
        match self {
            Self::MissingValues(_) => CheckCode::MissingValues,
            Self::DuplicateRows(_) => CheckCode::DuplicateRows,
            Self::InvalidEmails => CheckCode::InvalidEmail,
            Self::MissingOrZeroPrices => CheckCode::MissingOrZeroPrice,
            Self::ProductIdStart => CheckCode::ProductIdStart,
            Self::NonPositiveAmounts => CheckCode::NonPositiveAmount,
            Self::FutureDates => CheckCode::FutureDate,
            Self::MissingDates => CheckCode::MissingDate,
            Self::InvalidProductReferences => CheckCode::InvalidProductReference,
        }
    }

    /// Run this check against the snapshot
    pub fn apply(&self, dataset: &Dataset, ctx: &RunContext) -> Result<Vec<Finding>, EngineError> {
        let finding = match self {
            Self::MissingValues(kind) => return Ok(rules::missing_values(dataset.table(*kind))),
            Self::DuplicateRows(kind) => rules::duplicate_rows(dataset.table(*kind)),
            Self::InvalidEmails => rules::invalid_emails(&dataset.customers)?,
            Self::MissingOrZeroPrices => rules::missing_or_zero_prices(&dataset.products)?,
            Self::ProductIdStart => rules::product_id_start(&dataset.products)?,
            Self::NonPositiveAmounts => rules::non_positive_amounts(&dataset.transactions)?,
            Self::FutureDates => rules::future_dates(&dataset.transactions, ctx.now)?,
            Self::MissingDates => rules::missing_dates(&dataset.transactions)?,
            Self::InvalidProductReferences => {
                rules::invalid_product_references(&dataset.transactions, &dataset.products)?
            }
        };

        Ok(vec![finding])
    }
}

/// Evaluation order; report sections and the flagged-row export follow it
pub const CHECKS: &[Check] = &[
    Check::MissingValues(TableKind::Customers),
    Check::DuplicateRows(TableKind::Customers),
    Check::InvalidEmails,
    Check::MissingValues(TableKind::Products),
    Check::DuplicateRows(TableKind::Products),
    Check::MissingOrZeroPrices,
    Check::ProductIdStart,
    Check::MissingValues(TableKind::Transactions),
    Check::DuplicateRows(TableKind::Transactions),
    Check::NonPositiveAmounts,
    Check::FutureDates,
    Check::MissingDates,
    Check::InvalidProductReferences,
];

/// Ordered rule set over one dataset snapshot
#[derive(Debug, Clone, Copy)]
pub struct RuleSet {
    checks: &'static [Check],
}

impl Default for RuleSet {
    fn default() -> Self {
        Self { checks: CHECKS }
    }
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn checks(&self) -> &'static [Check] {
        self.checks
    }

    /// Apply every check in order
    ///
    /// Stops at the first data-shape error; content problems never stop
    /// evaluation.
    pub fn evaluate(&self, dataset: &Dataset, ctx: &RunContext) -> Result<Vec<Finding>, EngineError> {
        let mut findings = Vec::new();

        for check in self.checks {
            let produced = check.apply(dataset, ctx)?;

            for finding in &produced {
                tracing::debug!(
                    table = %finding.table,
                    check = %finding.code,
                    status = %finding.status,
                    count = finding.count,
                    "{}",
                    finding.message
                );
            }

            findings.extend(produced);
        }

        Ok(findings)
    }
}

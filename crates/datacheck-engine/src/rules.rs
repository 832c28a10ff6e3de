//! Data quality checks
//!
//! Each check is a pure function of one or two tables (and, for the
//! future-date check, the run's captured "now"). Checks never skip: an empty
//! table yields passing findings with a count of 0.

use chrono::NaiveDateTime;
use datacheck_core::{CheckCode, Finding, Row, Status, Table, Value};
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use crate::error::EngineError;

/// Address shape accepted by the email check, anchored at both ends
pub const EMAIL_PATTERN: &str = r"^[\w\.-]+@[\w\.-]+\.\w{2,4}$";

/// Lowest product id a well-numbered catalogue starts from
pub const EXPECTED_FIRST_PRODUCT_ID: f64 = 1.0;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("valid regex"));

/// Null, or text with nothing in it
pub fn is_missing(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Text(s) => s.is_empty(),
        _ => false,
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

fn require_column(table: &Table, column: &str, check: CheckCode) -> Result<usize, EngineError> {
    table.column_index(column).ok_or_else(|| EngineError::MissingColumn {
        table: table.kind,
        column: column.to_string(),
        check,
    })
}

/// Rows whose cell in `column` satisfies `predicate`, in table order
fn rows_where(table: &Table, column: usize, predicate: impl Fn(&Value) -> bool) -> Vec<Row> {
    table
        .rows
        .iter()
        .filter(|row| predicate(row.get(column).unwrap_or(&Value::Null)))
        .cloned()
        .collect()
}

fn counted(table: &Table, code: CheckCode, label: &str, rows: Vec<Row>) -> Finding {
    let count = rows.len();
    Finding::counted(table.kind, code, format!("{}: {}", label, count), count).with_rows(rows)
}

/// One finding per column, passing columns included
pub fn missing_values(table: &Table) -> Vec<Finding> {
    table
        .columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            let rows = rows_where(table, index, is_missing);
            let count = rows.len();
            Finding::counted(
                table.kind,
                CheckCode::MissingValues,
                format!("Missing values in column '{}': {}", column, count),
                count,
            )
            .with_rows(rows)
        })
        .collect()
}

/// Every instance of a row that appears more than once
///
/// Rows are compared by content fingerprint, so a pair of duplicates counts
/// as 2 and both rows are flagged.
pub fn duplicate_rows(table: &Table) -> Finding {
    let fingerprints: Vec<String> = table.rows.iter().map(Row::fingerprint).collect();

    let mut occurrences: HashMap<&str, usize> = HashMap::new();
    for fingerprint in &fingerprints {
        *occurrences.entry(fingerprint.as_str()).or_default() += 1;
    }

    let rows: Vec<Row> = table
        .rows
        .iter()
        .zip(&fingerprints)
        .filter(|(_, fingerprint)| occurrences[fingerprint.as_str()] > 1)
        .map(|(row, _)| row.clone())
        .collect();

    counted(table, CheckCode::DuplicateRows, "Duplicate rows", rows)
}

/// Emails that do not match [`EMAIL_PATTERN`]; missing emails are left to
/// the missing-values check
pub fn invalid_emails(customers: &Table) -> Result<Finding, EngineError> {
    let email = require_column(customers, "email", CheckCode::InvalidEmail)?;

    let rows = rows_where(customers, email, |value| match value {
        Value::Text(s) if !s.is_empty() => !is_valid_email(s),
        Value::Number(_) | Value::DateTime(_) => true,
        _ => false,
    });

    Ok(counted(customers, CheckCode::InvalidEmail, "Invalid email addresses", rows))
}

/// Numeric amounts `<= 0`; nulls and non-numeric text do not match
pub fn non_positive_amounts(transactions: &Table) -> Result<Finding, EngineError> {
    let amount = require_column(transactions, "amount", CheckCode::NonPositiveAmount)?;

    let rows = rows_where(transactions, amount, |value| {
        value.as_number().is_some_and(|n| n <= 0.0)
    });

    Ok(counted(
        transactions,
        CheckCode::NonPositiveAmount,
        "Negative or zero transaction amounts",
        rows,
    ))
}

/// Transactions dated strictly after `now`
pub fn future_dates(transactions: &Table, now: NaiveDateTime) -> Result<Finding, EngineError> {
    let date = require_column(transactions, "transaction_date", CheckCode::FutureDate)?;

    let rows = rows_where(transactions, date, |value| {
        value.as_datetime().is_some_and(|dt| dt > now)
    });

    Ok(counted(transactions, CheckCode::FutureDate, "Transactions dated in the future", rows))
}

/// Transactions without a usable date, including ones that failed to parse
pub fn missing_dates(transactions: &Table) -> Result<Finding, EngineError> {
    let date = require_column(transactions, "transaction_date", CheckCode::MissingDate)?;

    let rows = rows_where(transactions, date, is_missing);

    Ok(counted(transactions, CheckCode::MissingDate, "Missing transaction dates", rows))
}

/// Transactions whose product_id is not among the products' ids
///
/// Membership test against the set of product ids; a missing reference is
/// never a member.
pub fn invalid_product_references(transactions: &Table, products: &Table) -> Result<Finding, EngineError> {
    let reference = require_column(transactions, "product_id", CheckCode::InvalidProductReference)?;
    let product_id = require_column(products, "product_id", CheckCode::InvalidProductReference)?;

    // A missing id is a member too when Products itself has one
    let mut known_missing = false;
    let known: HashSet<String> = products
        .column_values(product_id)
        .filter(|value| {
            let missing = is_missing(value);
            known_missing |= missing;
            !missing
        })
        .map(Value::canonical)
        .collect();

    let rows = rows_where(transactions, reference, |value| {
        if is_missing(value) {
            !known_missing
        } else {
            !known.contains(&value.canonical())
        }
    });

    Ok(counted(
        transactions,
        CheckCode::InvalidProductReference,
        "Transactions with invalid product_id references",
        rows,
    ))
}

/// Products with a null or zero price
pub fn missing_or_zero_prices(products: &Table) -> Result<Finding, EngineError> {
    let price = require_column(products, "price", CheckCode::MissingOrZeroPrice)?;

    let rows = rows_where(products, price, |value| {
        is_missing(value) || value.as_number() == Some(0.0)
    });

    Ok(counted(products, CheckCode::MissingOrZeroPrice, "Products with missing or 0 price", rows))
}

/// Single finding on where product numbering starts
///
/// Only numeric ids take part; a table with none passes.
pub fn product_id_start(products: &Table) -> Result<Finding, EngineError> {
    let product_id = require_column(products, "product_id", CheckCode::ProductIdStart)?;

    let min = products
        .column_values(product_id)
        .filter_map(Value::as_number)
        .reduce(f64::min);

    let finding = match min {
        Some(min) if min > EXPECTED_FIRST_PRODUCT_ID => Finding::with_status(
            products.kind,
            CheckCode::ProductIdStart,
            Status::Issue,
            format!(
                "Product IDs start from {} (expected {})",
                Value::Number(min),
                Value::Number(EXPECTED_FIRST_PRODUCT_ID)
            ),
        ),
        _ => Finding::with_status(
            products.kind,
            CheckCode::ProductIdStart,
            Status::Ok,
            "Product ID starts correctly from 1",
        ),
    };

    Ok(finding)
}

//! End-to-end runs of the validation engine against files on disk

mod fixtures;

use datacheck_engine::{evaluate, run_checks, EngineError, RunContext};
use datacheck_loader::{load_dataset, CsvSource, LoadError};
use datacheck_core::{CheckCode, TableKind};
use pretty_assertions::assert_eq;

const MESSY_REPORT: &str = "\
DATA QUALITY ISSUES REPORT
===========================

Generated on: 2024-04-24 08:00:00

The following data quality checks were performed:

Customer Table Checks:
  [✓]  Missing values in column 'customer_id': 0
  [✓]  Missing values in column 'name': 0
  [!]  Missing values in column 'email': 1
  [!]  Duplicate rows: 2
  [!]  Invalid email addresses: 1

Product Table Checks:
  [✓]  Missing values in column 'product_id': 0
  [✓]  Missing values in column 'name': 0
  [!]  Missing values in column 'price': 1
  [✓]  Duplicate rows: 0
  [!]  Products with missing or 0 price: 2
  [!]  Product IDs start from 101 (expected 1)

Transaction Table Checks:
  [✓]  Missing values in column 'transaction_id': 0
  [✓]  Missing values in column 'customer_id': 0
  [✓]  Missing values in column 'product_id': 0
  [!]  Missing values in column 'transaction_date': 1
  [✓]  Missing values in column 'amount': 0
  [✓]  Duplicate rows: 0
  [!]  Negative or zero transaction amounts: 2
  [!]  Transactions dated in the future: 1
  [!]  Missing transaction dates: 1
  [!]  Transactions with invalid product_id references: 1

Summary of Issues Found:
  [!]  Missing values in column 'email': 1
  [!]  Duplicate rows: 2
  [!]  Invalid email addresses: 1
  [!]  Missing values in column 'price': 1
  [!]  Products with missing or 0 price: 2
  [!]  Product IDs start from 101 (expected 1)
  [!]  Missing values in column 'transaction_date': 1
  [!]  Negative or zero transaction amounts: 2
  [!]  Transactions dated in the future: 1
  [!]  Missing transaction dates: 1
  [!]  Transactions with invalid product_id references: 1
";

const MESSY_EXPORT: &str = "\
source_table,check,customer_id,name,email,product_id,price,transaction_id,transaction_date,amount
customers,MISSING_VALUES,3,Cy Park,,,,,,
customers,DUPLICATE_ROWS,4,Di Moss,di@example.co.uk,,,,,
customers,DUPLICATE_ROWS,4,Di Moss,di@example.co.uk,,,,,
customers,INVALID_EMAIL,2,Bo Diaz,bo@example,,,,,
products,MISSING_VALUES,,Doohickey,,103,,,,
products,MISSING_OR_ZERO_PRICE,,Gadget,,102,0,,,
products,MISSING_OR_ZERO_PRICE,,Doohickey,,103,,,,
transactions,MISSING_VALUES,3,,,102,,3,,12
transactions,NON_POSITIVE_AMOUNT,2,,,999,,2,2024-04-02 00:00:00,-4
transactions,NON_POSITIVE_AMOUNT,1,,,103,,4,2099-01-01 00:00:00,0
transactions,FUTURE_DATE,1,,,103,,4,2099-01-01 00:00:00,0
transactions,MISSING_DATE,3,,,102,,3,,12
transactions,INVALID_PRODUCT_REFERENCE,2,,,999,,2,2024-04-02 00:00:00,-4
";

#[test]
fn test_messy_run_writes_report_and_export() {
    let root = tempfile::tempdir().unwrap();
    let config = fixtures::config_in(root.path());
    fixtures::write_messy(&config.data_path);

    let outcome = run_checks(&config, &RunContext::new(fixtures::run_start())).unwrap();

    assert_eq!(outcome.report_path, root.path().join("reports/quality_check_2024_04_24.txt"));
    assert_eq!(std::fs::read_to_string(&outcome.report_path).unwrap(), MESSY_REPORT);

    assert_eq!(outcome.flagged_rows, 13);
    assert_eq!(outcome.flagged_path.as_deref(), Some(config.flagged_output.as_path()));
    assert_eq!(std::fs::read_to_string(&config.flagged_output).unwrap(), MESSY_EXPORT);

    assert_eq!(outcome.report.summary.issues, 11);
    assert_eq!(outcome.report.summary.flagged_rows, 13);
}

#[test]
fn test_clean_run_reports_no_issues_and_skips_export() {
    let root = tempfile::tempdir().unwrap();
    let config = fixtures::config_in(root.path());
    fixtures::write_clean(&config.data_path);

    let outcome = run_checks(&config, &RunContext::new(fixtures::run_start())).unwrap();
    let text = std::fs::read_to_string(&outcome.report_path).unwrap();

    assert!(text.ends_with("Summary of Issues Found:\n  No critical data quality issues found.\n"));
    assert!(text.contains("  [✓]  Product ID starts correctly from 1"));
    assert!(!text.contains("[!]"));
    assert_eq!(outcome.flagged_path, None);
    assert!(!config.flagged_output.exists());
}

#[test]
fn test_empty_transactions_still_reported() {
    let root = tempfile::tempdir().unwrap();
    let config = fixtures::config_in(root.path());
    fixtures::write_clean(&config.data_path);
    fixtures::write(&config.data_path, "transactions.csv", fixtures::EMPTY_TRANSACTIONS);

    let outcome = run_checks(&config, &RunContext::new(fixtures::run_start())).unwrap();
    let transactions: Vec<_> = outcome.report.findings_for(TableKind::Transactions).collect();

    // five missing-value lines plus six transaction checks
    assert_eq!(transactions.len(), 11);
    assert!(transactions.iter().all(|f| !f.is_issue() && f.count == 0));
    assert_eq!(outcome.flagged_rows, 0);
    assert!(!config.flagged_output.exists());
}

#[test]
fn test_future_cutoff_is_the_captured_instant() {
    let root = tempfile::tempdir().unwrap();
    let config = fixtures::config_in(root.path());
    fixtures::write_clean(&config.data_path);
    fixtures::write(
        &config.data_path,
        "transactions.csv",
        "transaction_id;customer_id;product_id;transaction_date;amount\n\
         1;1;1;2024-04-24 08:00:01;5\n\
         2;1;1;2024-04-24 07:59:59;5\n",
    );

    let source = CsvSource::from_config(&config).unwrap();
    let loaded = load_dataset(&source).unwrap();
    let evaluation = evaluate(&loaded.dataset, &RunContext::new(fixtures::run_start())).unwrap();

    let future = evaluation
        .report
        .findings
        .iter()
        .find(|f| f.code == CheckCode::FutureDate)
        .unwrap();
    assert_eq!(future.count, 1);
    assert_eq!(evaluation.flagged.len(), 1);
}

#[test]
fn test_runs_are_idempotent() {
    let root = tempfile::tempdir().unwrap();
    let config = fixtures::config_in(root.path());
    fixtures::write_messy(&config.data_path);
    let ctx = RunContext::new(fixtures::run_start());

    let first = run_checks(&config, &ctx).unwrap();
    let first_report = std::fs::read_to_string(&first.report_path).unwrap();
    let first_export = std::fs::read_to_string(&config.flagged_output).unwrap();

    let second = run_checks(&config, &ctx).unwrap();
    let second_report = std::fs::read_to_string(&second.report_path).unwrap();
    let second_export = std::fs::read_to_string(&config.flagged_output).unwrap();

    assert_eq!(first_report, second_report);
    assert_eq!(first_export, second_export);
    assert_eq!(first.report.findings, second.report.findings);
}

#[test]
fn test_missing_column_aborts_before_writing() {
    let root = tempfile::tempdir().unwrap();
    let config = fixtures::config_in(root.path());
    fixtures::write_messy(&config.data_path);
    fixtures::write(&config.data_path, "products.csv", "product_id;name\n1;Widget\n");

    let err = run_checks(&config, &RunContext::new(fixtures::run_start())).unwrap_err();

    assert!(matches!(
        err,
        EngineError::Load(LoadError::MissingColumns { table: TableKind::Products, .. })
    ));
    assert!(!config.reports_dir.exists());
    assert!(!config.flagged_output.exists());
}

#[test]
fn test_missing_file_aborts_before_writing() {
    let root = tempfile::tempdir().unwrap();
    let config = fixtures::config_in(root.path());
    fixtures::write(&config.data_path, "customers.csv", fixtures::CLEAN_CUSTOMERS);

    let err = run_checks(&config, &RunContext::new(fixtures::run_start())).unwrap_err();

    assert!(matches!(err, EngineError::Load(LoadError::FileNotFound { .. })));
    assert!(!config.reports_dir.exists());
}

#[test]
fn test_unwritable_export_leaves_no_report() {
    let root = tempfile::tempdir().unwrap();
    let mut config = fixtures::config_in(root.path());
    fixtures::write_messy(&config.data_path);

    // a directory where the export file should go
    config.flagged_output = root.path().join("flagged");
    std::fs::create_dir_all(&config.flagged_output).unwrap();

    let err = run_checks(&config, &RunContext::new(fixtures::run_start())).unwrap_err();

    assert!(matches!(err, EngineError::Write { .. }));
    assert!(!config.reports_dir.join("quality_check_2024_04_24.txt").exists());
}

#[test]
fn test_report_metadata_records_inputs() {
    let root = tempfile::tempdir().unwrap();
    let config = fixtures::config_in(root.path());
    fixtures::write_messy(&config.data_path);

    let outcome = run_checks(&config, &RunContext::new(fixtures::run_start())).unwrap();
    let json = outcome.report.to_json().unwrap();

    assert!(json.contains("\"inputs\""));
    assert!(json.contains("\"sha256\""));
    assert!(json.contains("INVALID_PRODUCT_REFERENCE"));
}

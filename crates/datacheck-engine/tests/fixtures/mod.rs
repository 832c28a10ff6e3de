//! Test fixtures for end-to-end engine runs
//!
//! `messy_*` trips every check at least once; `clean_*` trips none.

use chrono::{NaiveDate, NaiveDateTime};
use datacheck_core::Config;
use std::path::Path;

pub const MESSY_CUSTOMERS: &str = "\
customer_id;name;email
1;Ann Lee;ann.lee@example.com
2;Bo Diaz;bo@example
3;Cy Park;
4;Di Moss;di@example.co.uk
4;Di Moss;di@example.co.uk
";

pub const MESSY_PRODUCTS: &str = "\
product_id;name;price
101;Widget;9.99
102;Gadget;0
103;Doohickey;
";

pub const MESSY_TRANSACTIONS: &str = "\
transaction_id;customer_id;product_id;transaction_date;amount
1;1;101;2024-04-01 10:00:00;19.98
2;2;999;2024-04-02;-4
3;3;102;someday;12
4;1;103;2099-01-01 00:00:00;0
";

pub const CLEAN_CUSTOMERS: &str = "\
customer_id;name;email
1;Ann Lee;ann.lee@example.com
2;Bo Diaz;bo.diaz@example.org
";

pub const CLEAN_PRODUCTS: &str = "\
product_id;name;price
1;Widget;9.99
2;Gadget;4.5
";

pub const CLEAN_TRANSACTIONS: &str = "\
transaction_id;customer_id;product_id;transaction_date;amount
1;1;1;2024-04-01 10:00:00;19.98
2;2;2;2024-04-02 11:30:00;4.5
";

pub const EMPTY_TRANSACTIONS: &str = "transaction_id;customer_id;product_id;transaction_date;amount\n";

/// Fixed run start used by every fixture
pub fn run_start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 4, 24)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap()
}

pub fn write(dir: &Path, name: &str, contents: &str) {
    std::fs::write(dir.join(name), contents).expect("write fixture");
}

pub fn write_messy(dir: &Path) {
    write(dir, "customers.csv", MESSY_CUSTOMERS);
    write(dir, "products.csv", MESSY_PRODUCTS);
    write(dir, "transactions.csv", MESSY_TRANSACTIONS);
}

pub fn write_clean(dir: &Path) {
    write(dir, "customers.csv", CLEAN_CUSTOMERS);
    write(dir, "products.csv", CLEAN_PRODUCTS);
    write(dir, "transactions.csv", CLEAN_TRANSACTIONS);
}

/// Config reading from `root/data` and writing under `root`
pub fn config_in(root: &Path) -> Config {
    let data = root.join("data");
    std::fs::create_dir_all(&data).expect("create data dir");

    Config {
        data_path: data,
        reports_dir: root.join("reports"),
        flagged_output: root.join("flagged_transactions.csv"),
        ..Config::default()
    }
}

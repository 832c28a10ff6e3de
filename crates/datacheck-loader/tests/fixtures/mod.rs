//! Test fixtures for loader integration tests
//!
//! Small semicolon-delimited files resembling the real exports, written
//! into a scratch directory per test.

use std::path::Path;

pub const CUSTOMERS: &str = "\
customer_id;name;email
1;Ann Lee;ann.lee@example.com
2;Bo Diaz;bo@example
3;Cy Park;
";

pub const PRODUCTS: &str = "\
product_id;name;price
101;Widget;9.99
102;Gadget;0
103;Doohickey;
";

pub const TRANSACTIONS: &str = "\
transaction_id;customer_id;product_id;transaction_date;amount
1;1;101;2024-04-01 10:00:00;19.98
2;2;999;2024-04-02;-4
3;3;102;someday;12
";

/// Write all three fixture files into `dir`
pub fn write_all(dir: &Path) {
    write(dir, "customers.csv", CUSTOMERS);
    write(dir, "products.csv", PRODUCTS);
    write(dir, "transactions.csv", TRANSACTIONS);
}

pub fn write(dir: &Path, name: &str, contents: &str) {
    std::fs::write(dir.join(name), contents).expect("write fixture");
}

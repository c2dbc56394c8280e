//! Integration tests for the till register CLI.
//!
//! These tests run the actual binary with scripted stdin against the
//! fixture catalog in `tests/data`.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

/// Get path to test data file
fn test_data_path(filename: &str) -> String {
    format!("tests/data/{}", filename)
}

fn till() -> Command {
    let mut cmd = Command::cargo_bin("till-register").unwrap();
    cmd.env_remove("TILL_CATALOG").env_remove("RUST_LOG");
    cmd
}

/// Run the binary with the fixture catalog and the given stdin, return stdout
fn run_till(input: &str) -> String {
    let assert = till()
        .arg("--catalog")
        .arg(test_data_path("products.json"))
        .write_stdin(input)
        .assert()
        .success();
    String::from_utf8(assert.get_output().stdout.clone()).unwrap()
}

fn catalog_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_lists_available_products() {
    let output = run_till("exit\n");

    assert!(output.contains("============== Available Products ============="));
    assert!(predicate::str::is_match(r"A: Product A\s+1\.10 €")
        .unwrap()
        .eval(&output));
    assert!(predicate::str::is_match(r"B: Product B\s+2\.20 €")
        .unwrap()
        .eval(&output));
}

#[test]
fn test_receipt_with_buy_one_get_one_free() {
    let output = run_till("a\nb\nb\nreceipt\n");

    for pattern in [
        r"=+ Discounts =+",
        r"B\s+\(Buy one get one free\)\s+-\s+2\.20 €",
        r"=+   Total   =+",
        r"Purchases:\s+5\.50 €",
        r"Discounts:\s+-\s+2\.20 €",
        r"Total amount due:\s+3\.30 €",
    ] {
        assert!(
            predicate::str::is_match(pattern).unwrap().eval(&output),
            "missing {:?} in:\n{}",
            pattern,
            output
        );
    }
}

#[test]
fn test_receipt_without_discounts() {
    let output = run_till("b\nreceipt\n");

    assert!(!output.contains("Discounts"));
    assert!(!output.contains("Purchases:"));
    assert!(!predicate::str::is_match(r"=+   Total   =+")
        .unwrap()
        .eval(&output));
    assert!(predicate::str::is_match(r"Total amount due:\s+2\.20 €")
        .unwrap()
        .eval(&output));
}

#[test]
fn test_bulk_purchase_receipt() {
    let output = run_till("pr1 pr1 pr1 pr1 pr1 pr1 pr1\nreceipt\n");

    assert!(predicate::str::is_match(r"PR1\s+\(Bulk purchase discount\)\s+-\s+10\.50 €")
        .unwrap()
        .eval(&output));
    assert!(predicate::str::is_match(r"Total amount due:\s+67\.20 €")
        .unwrap()
        .eval(&output));
}

#[test]
fn test_volume_ratio_receipt_rounds_discount() {
    let input = format!("{}\nreceipt\n", vec!["pr2"; 15].join(","));
    let output = run_till(&input);

    assert!(output.contains("15 Product 2"));
    assert!(predicate::str::is_match(r"Purchases:\s+166\.50 €")
        .unwrap()
        .eval(&output));
    assert!(predicate::str::is_match(r"PR2\s+\(Volume ratio discount\)\s+-\s+41\.63 €")
        .unwrap()
        .eval(&output));
    assert!(predicate::str::is_match(r"Total amount due:\s+124\.87 €")
        .unwrap()
        .eval(&output));
}

#[test]
fn test_receipt_on_empty_cart_prints_nothing() {
    let output = run_till("receipt\n");

    assert!(!output.contains("Purchases"));
    assert!(!output.contains("Discounts"));
    assert!(!output.contains("Total"));
}

#[test]
fn test_exit_after_scanning_prints_no_receipt() {
    let output = run_till("a\nexit\n");

    assert!(output.contains("Product A Scanned"));
    assert!(!output.contains("Purchases"));
    assert!(!output.contains("Total"));
}

#[test]
fn test_input_is_case_insensitive_and_separated() {
    let output = run_till("a a,b, b b\nb\nReCeIpT\n");

    assert!(output.contains("============= Products in the cart ============\n2 Product A, 4 Product B"));
    assert!(predicate::str::is_match(r"Total amount due:\s+6\.60 €")
        .unwrap()
        .eval(&output));
}

#[test]
fn test_invalid_product_code() {
    let output = run_till("invalid\nreceipt\n");

    assert!(output.contains("Invalid product code. Please try again."));
    assert_eq!(output.matches("Available Products").count(), 2);
}

#[test]
fn test_misconfigured_discount_fails_on_receipt() {
    till()
        .arg("--catalog")
        .arg(test_data_path("products.json"))
        .write_stdin("bad\nreceipt\n")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Broken Offer Scanned"))
        .stderr(predicate::str::contains("invalid arguments for 'volume_ratio_discount'"));
}

#[test]
fn test_overflowing_receipt_fails_cleanly() {
    let file = catalog_file(
        r#"[{"code": "X", "name": "Huge", "price": "40000000000000000000000000000"}]"#,
    );

    till()
        .arg("--catalog")
        .arg(file.path())
        .write_stdin("x x\nreceipt\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Amount overflow computing line total for X"))
        .stderr(predicate::str::contains("panicked").not());
}

#[test]
fn test_catalog_from_environment() {
    till()
        .env("TILL_CATALOG", test_data_path("products.json"))
        .write_stdin("exit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("PR2: Product 2"));
}

#[test]
fn test_missing_catalog_error() {
    till()
        .arg("--catalog")
        .arg("nonexistent.json")
        .write_stdin("exit\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot read catalog"));
}

#[test]
fn test_malformed_catalog_error() {
    let file = catalog_file(r#"[{"code": "A", "name": "Product A"}]"#);

    till()
        .arg("--catalog")
        .arg(file.path())
        .write_stdin("exit\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Catalog parsing error"));
}

#[test]
fn test_duplicate_code_catalog_error() {
    let file = catalog_file(
        r#"[
            {"code": "A", "name": "Product A", "price": 1.0},
            {"code": "a", "name": "Product a", "price": 2.0}
        ]"#,
    );

    till()
        .arg("--catalog")
        .arg(file.path())
        .write_stdin("exit\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Duplicate product code A"));
}

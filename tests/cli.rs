use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

use std::fs;

const BOUGHT: &str = "\
id,product_name,buy_date,purchase_price,expiry_date
1,apple,2024-01-02,0.95,2024-01-10
2,banana,2024-01-03,0.50,2024-01-08
3,apple,2024-01-04,1.05,2024-01-12
";

const SOLD: &str = "\
product_name,sale_price,expiry_date
apple,1.50,2024-01-01
apple,1.75,
banana,0.80,2024-12-31
";

/// Sets up a working directory with both store files.
fn stores() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("boughtcsv.csv"), BOUGHT).unwrap();
    fs::write(dir.path().join("soldcsv.csv"), SOLD).unwrap();
    dir
}

fn stocktake(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("stocktake").unwrap();
    cmd.current_dir(dir.path());
    cmd
}

#[test]
fn missing_purchase_store_fails_naming_the_path() {
    let dir = TempDir::new().unwrap();
    stocktake(&dir)
        .args(["action", "count"])
        .assert()
        .failure()
        .stderr(contains("boughtcsv.csv"));
}

#[test]
fn count_action_reports_purchase_events_per_product() {
    let dir = stores();
    stocktake(&dir)
        .args(["action", "count"])
        .assert()
        .success()
        .stdout(contains("Current product counts:").and(contains("apple").and(contains("2"))));
}

#[test]
fn products_action_honors_filter_list() {
    let dir = stores();
    stocktake(&dir)
        .args([
            "action",
            "products",
            "--format",
            "plain",
            "--product_list",
            "banana",
            "cherry",
        ])
        .assert()
        .success()
        .stdout(contains("banana").and(contains("apple").not()));
}

#[test]
fn details_action_reports_first_purchase_per_product() {
    let dir = stores();
    stocktake(&dir)
        .args(["action", "details"])
        .assert()
        .success()
        .stdout(contains("Purchase Price: 0.95").and(contains("Expiry Date: 2024-01-10")));
}

#[test]
fn sold_action_marks_past_expiry_as_expired() {
    let dir = stores();
    stocktake(&dir)
        .args(["action", "sold", "--expiry_date", "2024-06-01"])
        .assert()
        .success()
        .stdout(contains("Status: Expired").and(contains("Status: Not Expired")));
}

#[test]
fn sold_action_restricts_to_sold_product() {
    let dir = stores();
    stocktake(&dir)
        .args([
            "action",
            "sold",
            "--expiry_date",
            "2024-06-01",
            "--sold_product",
            "banana",
        ])
        .assert()
        .success()
        .stdout(contains("banana").and(contains("apple").not()));
}

#[test]
fn buy_with_missing_price_prints_guidance_and_mutates_nothing() {
    let dir = stores();
    stocktake(&dir)
        .args([
            "action",
            "buy",
            "--product_name",
            "cherry",
            "--quantity",
            "2",
            "--expiry_date",
            "2024-09-01",
        ])
        .assert()
        .success()
        .stdout(contains("Please specify a price using --price"));
    let bought = fs::read_to_string(dir.path().join("boughtcsv.csv")).unwrap();
    assert_eq!(bought.lines().count(), 4, "store should be unchanged");
}

#[test]
fn buy_appends_record_dated_with_the_simulated_clock() {
    let dir = stores();
    fs::write(dir.path().join("current_day.txt"), "2024-02-01").unwrap();
    stocktake(&dir)
        .args([
            "action",
            "buy",
            "--product_name",
            "cherry",
            "--price",
            "2.50",
            "--quantity",
            "4",
            "--expiry_date",
            "2024-09-01",
        ])
        .assert()
        .success()
        .stdout(contains("Bought 4 cherry(s) for $2.50 each."));
    let bought = fs::read_to_string(dir.path().join("boughtcsv.csv")).unwrap();
    assert_eq!(bought.lines().count(), 5, "record should be persisted");
    assert!(bought.contains("4,cherry,2024-02-01,2.50,2024-09-01"));
}

#[test]
fn sell_persists_record_and_set_date_updates_the_clock() {
    let dir = stores();
    stocktake(&dir)
        .args([
            "action",
            "sell",
            "--product_name",
            "banana",
            "--price",
            "0.90",
            "--expiry_date",
            "2024-07-01",
            "--set_date",
            "2024-05-05",
        ])
        .assert()
        .success()
        .stdout(
            contains("Sold banana for $0.90. Expiry date: 2024-07-01")
                .and(contains("Setting the current date to 2024-05-05.")),
        );
    let sold = fs::read_to_string(dir.path().join("soldcsv.csv")).unwrap();
    assert!(sold.contains("banana,0.90,2024-07-01"));
    let day = fs::read_to_string(dir.path().join("current_day.txt")).unwrap();
    assert_eq!(day.trim(), "2024-05-05");
}

#[test]
fn advance_time_shifts_the_simulated_date() {
    let dir = stores();
    fs::write(dir.path().join("current_day.txt"), "2024-06-01").unwrap();
    stocktake(&dir)
        .args(["advance-time", "3"])
        .assert()
        .success()
        .stdout(contains("Advancing time by 3 day(s)..."));
    let day = fs::read_to_string(dir.path().join("current_day.txt")).unwrap();
    assert_eq!(day.trim(), "2024-06-04");

    stocktake(&dir)
        .args(["advance-time", "--", "-4"])
        .assert()
        .success();
    let day = fs::read_to_string(dir.path().join("current_day.txt")).unwrap();
    assert_eq!(day.trim(), "2024-05-31");
}

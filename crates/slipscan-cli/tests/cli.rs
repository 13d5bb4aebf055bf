use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const RECEIPT: &str = "FRESH MART\n03/15/2024 10:42\nBananas 2.49\nWhole Milk 3.99\nTax 0.52\nTotal 6.48\n";

fn slipscan() -> Command {
    Command::cargo_bin("slipscan").unwrap()
}

/// Write a config file pinning the fallback date.
fn write_config(dir: &Path) -> PathBuf {
    let path = dir.join("config.json");
    fs::write(&path, r#"{ "parsing": { "fallback_date": "2001-02-03" } }"#).unwrap();
    path
}

#[test]
fn process_text_file_as_json() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());
    let input = dir.path().join("receipt.txt");
    fs::write(&input, RECEIPT).unwrap();

    let output = slipscan()
        .arg("--config")
        .arg(&config)
        .arg("process")
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let transactions = report["transactions"].as_array().unwrap();
    assert_eq!(transactions.len(), 2);
    assert_eq!(transactions[0]["description"], "Bananas");
    assert_eq!(transactions[0]["amount"], "2.49");
    assert_eq!(transactions[0]["date"], "2024-03-15");
    assert_eq!(transactions[0]["suggested_category"], "Food");
    assert_eq!(report["date_source"], "document");
}

#[test]
fn process_stdin_uses_fallback_date() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());

    slipscan()
        .arg("--config")
        .arg(&config)
        .args(["process", "-", "--format", "csv"])
        .write_stdin("Uber ride 15.00\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("2001-02-03,Uber ride,15.00,Transport,receipt_upload"))
        .stderr(predicate::str::contains("No date found"));
}

#[test]
fn process_stdin_respects_size_limit() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");
    fs::write(&config, r#"{ "source": { "max_file_bytes": 10 } }"#).unwrap();

    slipscan()
        .arg("--config")
        .arg(&config)
        .args(["process", "-"])
        .write_stdin("Uber ride 15.00\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("10 byte limit"));
}

#[test]
fn process_writes_output_file() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());
    let input = dir.path().join("receipt.ocr");
    let output = dir.path().join("out.txt");
    fs::write(&input, RECEIPT).unwrap();

    slipscan()
        .arg("--config")
        .arg(&config)
        .arg("process")
        .arg(&input)
        .args(["-f", "text", "-o"])
        .arg(&output)
        .assert()
        .success();

    let written = fs::read_to_string(&output).unwrap();
    assert!(written.contains("Date: 2024-03-15"));
    assert!(written.contains("Whole Milk"));
}

#[test]
fn process_rejects_images() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("photo.png");
    fs::write(&input, [0x89, b'P', b'N', b'G']).unwrap();

    slipscan()
        .arg("process")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("OCR"));
}

#[test]
fn process_missing_file_fails() {
    slipscan()
        .args(["process", "does-not-exist.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn batch_writes_outputs_and_summary() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());
    let out = dir.path().join("out");
    fs::write(dir.path().join("a.txt"), RECEIPT).unwrap();
    fs::write(dir.path().join("b.txt"), "Pharmacy vitamins 12.00\n").unwrap();
    fs::write(dir.path().join("empty.txt"), "   \n").unwrap();

    let pattern = format!("{}/*.txt", dir.path().display());
    slipscan()
        .arg("--config")
        .arg(&config)
        .args(["batch", &pattern, "--summary", "--continue-on-error", "-j", "2", "-o"])
        .arg(&out)
        .assert()
        .success();

    assert!(out.join("a.json").exists());
    assert!(out.join("b.json").exists());
    assert!(!out.join("empty.json").exists());

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    let lines: Vec<&str> = summary.lines().collect();
    assert_eq!(lines[0], "filename,status,transactions,total,date,error");
    assert_eq!(lines[1], "a.txt,success,2,6.48,2024-03-15,");
    assert_eq!(lines[2], "b.txt,success,1,12.00,2001-02-03,");
    assert!(lines[3].starts_with("empty.txt,error,,,,"));
}

#[test]
fn batch_stops_on_error_by_default() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("empty.txt"), "").unwrap();

    let pattern = format!("{}/*.txt", dir.path().display());
    slipscan()
        .args(["batch", &pattern])
        .assert()
        .failure()
        .stderr(predicate::str::contains("empty"));
}

#[test]
fn categorize_description() {
    slipscan()
        .args(["categorize", "Shell", "gas", "station"])
        .assert()
        .success()
        .stdout("Transport\n");
}

#[test]
fn categorize_scores_list_every_category() {
    slipscan()
        .args(["categorize", "--scores", "uber", "soap"])
        .assert()
        .success()
        .stdout("Household\n")
        .stderr(
            predicate::str::contains("Household  1")
                .and(predicate::str::contains("Transport  1"))
                .and(predicate::str::contains("Food       0")),
        );
}

#[test]
fn categorize_unknown_is_uncategorized() {
    slipscan()
        .args(["categorize", "zzz"])
        .assert()
        .success()
        .stdout("Uncategorized\n");
}

#[test]
fn config_init_get_set() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.json");

    slipscan()
        .arg("--config")
        .arg(&path)
        .args(["config", "init"])
        .assert()
        .success();
    assert!(path.exists());

    slipscan()
        .arg("--config")
        .arg(&path)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    slipscan()
        .arg("--config")
        .arg(&path)
        .args(["config", "set", "parsing.min_description_chars", "6"])
        .assert()
        .success();

    slipscan()
        .arg("--config")
        .arg(&path)
        .args(["config", "get", "parsing.min_description_chars"])
        .assert()
        .success()
        .stdout("6\n");

    slipscan()
        .arg("--config")
        .arg(&path)
        .args(["config", "set", "parsing.min_description_chars", "lots"])
        .assert()
        .failure();
}

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn certscan(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("certscan").unwrap();
    cmd.env("HOME", home).env("XDG_CONFIG_HOME", home.join(".config"));
    cmd
}

fn write(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn process_driver_license_as_json() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "license.txt", "Bằng lái xe\nSố: 12345678\nCó giá trị đến: Không thời hạn\n");

    certscan(dir.path())
        .args(["process", &input])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""category":"driver_license""#))
        .stdout(predicate::str::contains(r#""code":"12345678""#))
        .stdout(predicate::str::contains("Không thời hạn"))
        .stdout(predicate::str::contains("raw_text").not());
}

#[test]
fn process_json_line_array_from_stdin() {
    let dir = TempDir::new().unwrap();

    certscan(dir.path())
        .args(["process", "-", "--format", "text"])
        .write_stdin(r#"["Registration Number 1234 5678 9012 3456", "Test Date: 19 Sep 2015"]"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("Category: toefl"))
        .stdout(predicate::str::contains("Code: 1234 5678 9012 3456"))
        .stdout(predicate::str::contains("Expiry date: 2017-09-19 (derived)"));
}

#[test]
fn process_rejects_non_certificate() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "memo.txt", "Random memo\nno dates, no codes\n");

    certscan(dir.path())
        .args(["process", &input])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not look like a certificate"));
}

#[test]
fn process_missing_file_fails() {
    let dir = TempDir::new().unwrap();

    certscan(dir.path())
        .args(["process", "does-not-exist.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn process_honors_config_file() {
    let dir = TempDir::new().unwrap();
    let config = write(dir.path(), "config.json", r#"{"extraction": {"derive_expiry": false}}"#);
    let input = write(dir.path(), "ielts.txt", "IELTS Test Report Form\nCandidate Number 1234567\n18/FEB/2023\n");

    certscan(dir.path())
        .args(["--config", &config, "process", &input, "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ielts,1234567,"))
        .stdout(predicate::str::contains("2025-02-18").not());
}

#[test]
fn batch_writes_outputs_and_summary() {
    let dir = TempDir::new().unwrap();
    let inputs = dir.path().join("inputs");
    let out = dir.path().join("out");
    fs::create_dir_all(&inputs).unwrap();

    write(&inputs, "ielts.txt", "IELTS Test Report Form\nCandidate Number 1234567\n18/FEB/2023\n");
    write(&inputs, "license.txt", "Bằng lái xe\nSố: 12345678\nCó giá trị đến: Không thời hạn\n");
    write(&inputs, "memo.txt", "Random memo\nno dates, no codes\n");

    let pattern = inputs.join("*.txt").to_string_lossy().into_owned();
    certscan(dir.path())
        .args(["batch", &pattern, "-j", "2", "--summary", "--continue-on-error"])
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 successful, 1 failed"));

    assert!(out.join("ielts.json").exists());
    assert!(out.join("license.json").exists());
    assert!(!out.join("memo.json").exists());

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    let rows: Vec<&str> = summary.lines().collect();
    assert_eq!(rows.len(), 4);
    assert!(rows[0].starts_with("filename,status,category,code"));
    assert!(rows[1].starts_with("ielts.txt,success,ielts,1234567"));
    assert!(rows[2].starts_with("license.txt,success,driver_license,12345678"));
    assert!(rows[3].starts_with("memo.txt,error"));
}

#[test]
fn batch_stops_on_error_by_default() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "memo.txt", "Random memo\nno dates, no codes\n");

    let pattern = dir.path().join("*.txt").to_string_lossy().into_owned();
    certscan(dir.path())
        .args(["batch", &pattern])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Processing failed"));
}

#[test]
fn config_init_get_and_set() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("certscan.json").to_string_lossy().into_owned();

    certscan(dir.path())
        .args(["--config", &config, "config", "init"])
        .assert()
        .success();

    certscan(dir.path())
        .args(["--config", &config, "config", "set", "extraction.trailing_window", "10"])
        .assert()
        .success();

    certscan(dir.path())
        .args(["--config", &config, "config", "get", "extraction.trailing_window"])
        .assert()
        .success()
        .stdout(predicate::str::diff("10\n"));

    certscan(dir.path())
        .args(["--config", &config, "config", "set", "extraction.unknown_key", "1"])
        .assert()
        .failure();

    certscan(dir.path())
        .args(["--config", &config, "config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

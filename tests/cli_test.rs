use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn trebuchet() -> Command {
    let mut cmd = Command::cargo_bin("trebuchet").unwrap();
    cmd.env_remove("CALIBRATION_INPUT_FILE")
        .env_remove("DEMO_MODE")
        .env_remove("RUST_LOG");
    cmd
}

fn write_input(dir: &TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path.to_str().unwrap().to_string()
}

#[test]
fn test_prints_lines_and_sum() {
    let dir = TempDir::new().unwrap();
    let input = write_input(
        &dir,
        "input.txt",
        "1abc2\npqr3stu8vwx\na1b2c3d4e5f\ntreb7uchet\n",
    );

    trebuchet()
        .args(["--input", &input])
        .assert()
        .success()
        .stdout(predicate::str::contains("Line: pqr3stu8vwx"))
        .stdout(predicate::str::ends_with("Sum: 142\n"));
}

#[test]
fn test_demo_flag_reads_demo_input_from_working_dir() {
    let dir = TempDir::new().unwrap();
    write_input(&dir, "demo-input.txt", "1abc2\ntreb7uchet\n");

    trebuchet()
        .current_dir(dir.path())
        .arg("--demo")
        .assert()
        .success()
        .stdout(predicate::str::contains("Sum: 89"));
}

#[test]
fn test_input_from_environment() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "day1.txt", "a7\n");

    trebuchet()
        .env("CALIBRATION_INPUT_FILE", &input)
        .arg("--quiet")
        .assert()
        .success()
        .stdout("Sum: 77\n");
}

#[test]
fn test_missing_file_exits_non_zero() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.txt");

    trebuchet()
        .args(["--input", missing.to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("could not be opened"));
}

#[test]
fn test_malformed_line_exits_non_zero() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "input.txt", "1abc2\nnothing\n");

    trebuchet()
        .args(["--input", &input, "--quiet"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Line 2"));
}

#[test]
fn test_json_output_with_skip() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "input.txt", "1abc2\n\ntreb7uchet\n");

    let output = trebuchet()
        .args(["--input", &input, "--format", "json", "--on-malformed", "skip"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["sum"], 89);
    assert_eq!(report["skipped"].as_array().unwrap().len(), 1);
}

#[test]
fn test_toml_config_file() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "input.txt", "two1nine\neightwothree\n");
    let config = write_input(
        &dir,
        "trebuchet.toml",
        &format!(
            "[input]\npath = {:?}\n[scan]\nmode = \"spelled\"\n[output]\necho_lines = false\n",
            input
        ),
    );

    trebuchet()
        .args(["--config", &config])
        .assert()
        .success()
        .stdout("Sum: 112\n");
}

#![cfg(feature = "cli")]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const SEMESTERS: &str = r#"{
  "SoSe 2024": {
    "lecture_period": ["2024-04-08", "2024-07-19"],
    "breaks": [["Pfingstpause", "2024-05-20", "2024-05-24"]]
  },
  "WiSe 2024/25": {
    "lecture_period": ["2024-10-07", "2025-02-07"],
    "breaks": [["Weihnachtsferien", "2024-12-23", "2025-01-06"]]
  }
}"#;

fn workspace() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("semesters.json"), SEMESTERS).unwrap();
    dir
}

#[allow(deprecated)]
fn seminarplan(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("seminarplan").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("RUST_LOG")
        .arg("--semester-file")
        .arg(dir.path().join("semesters.json"));
    cmd
}

#[test]
fn writes_markdown_schedule() {
    let dir = workspace();
    let output = dir.path().join("plan.md");

    seminarplan(&dir)
        .args(["-s", "SoSe 2024", "-o"])
        .arg(&output)
        .args(["1", "10:15", "11:45"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pfingstpause"))
        .stdout(predicate::str::contains("14 sessions, 1 excluded"));

    let md = fs::read_to_string(&output).unwrap();
    assert!(md.starts_with("| Datum"));
    assert!(md.contains("| 21.5.    | Pfingstpause |"));
}

#[test]
fn writes_calendar_with_course_name() {
    let dir = workspace();
    let output = dir.path().join("plan.ics");

    seminarplan(&dir)
        .args(["-s", "SoSe 2024", "-n", "Proseminar", "-o"])
        .arg(&output)
        .args(["1", "10:15", "11:45"])
        .assert()
        .success();

    let ics = fs::read_to_string(&output).unwrap();
    assert_eq!(ics.matches("BEGIN:VEVENT").count(), 14);
    assert!(ics.contains("SUMMARY:Proseminar"));
}

#[test]
fn english_locale_changes_headers() {
    let dir = workspace();
    let output = dir.path().join("plan.csv");

    seminarplan(&dir)
        .args(["--locale", "en", "-s", "WiSe 2024/25", "-o"])
        .arg(&output)
        .args(["2", "14:00", "16:00"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wednesday"));

    let csv = fs::read_to_string(&output).unwrap();
    assert!(csv.starts_with("Date,Topic\n"));
    assert!(csv.contains("Weihnachtsferien"));
}

#[test]
fn lists_known_semesters() {
    let dir = workspace();
    seminarplan(&dir)
        .arg("--list-semesters")
        .assert()
        .success()
        .stdout("SoSe 2024\nWiSe 2024/25\n");
}

#[test]
fn unknown_semester_fails() {
    let dir = workspace();
    let output = dir.path().join("plan.md");

    seminarplan(&dir)
        .args(["-s", "SoSe 1999", "-o"])
        .arg(&output)
        .args(["1", "10:15", "11:45"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("no dates found for semester \"SoSe 1999\""));
    assert!(!output.exists());
}

#[test]
fn unknown_output_format_fails_before_planning() {
    let dir = workspace();
    let output = dir.path().join("plan.xlsx");

    seminarplan(&dir)
        .args(["-s", "SoSe 2024", "-o"])
        .arg(&output)
        .args(["1", "10:15", "11:45"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown output format"));
    assert!(!output.exists());
}

#[test]
fn inverted_times_fail() {
    let dir = workspace();
    let output = dir.path().join("plan.md");

    seminarplan(&dir)
        .args(["-s", "SoSe 2024", "-o"])
        .arg(&output)
        .args(["1", "12:00", "10:00"])
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("Error:"));
}

#[test]
fn weekday_out_of_range_fails() {
    let dir = workspace();
    let output = dir.path().join("plan.md");

    seminarplan(&dir)
        .args(["-s", "SoSe 2024", "-o"])
        .arg(&output)
        .args(["9", "10:00", "12:00"])
        .assert()
        .failure();
}

#[test]
fn argument_errors_exit_with_one() {
    let dir = workspace();
    seminarplan(&dir)
        .args(["-s", "SoSe 2024", "-o", "plan.md", "1", "10:15"])
        .assert()
        .failure()
        .code(1);

    seminarplan(&dir)
        .args(["-s", "SoSe 2024", "-o", "plan.md", "not-a-day", "10:15", "11:45"])
        .assert()
        .failure()
        .code(1);
}

#[test]
fn help_exits_successfully() {
    let dir = workspace();
    seminarplan(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--list-semesters"));
}

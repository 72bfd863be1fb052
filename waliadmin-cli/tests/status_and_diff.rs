use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

use waliadmin_core::{paths, store, GradeEntry, StudentId, StudentRecord};

const DATE: &str = "2026-10-18";

fn waliadmin_cmd(home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("waliadmin"));
    cmd.env("HOME", home)
        .env("USERPROFILE", home)
        .env_remove("WALIADMIN_LOG");
    cmd
}

fn init_home() -> TempDir {
    let home = TempDir::new().expect("home");
    waliadmin_cmd(home.path()).arg("init").assert().success();

    let mut dataset = store::load_at(home.path()).expect("load");
    dataset
        .add_student(StudentRecord {
            id: StudentId::from("s1"),
            nis: "2201".to_string(),
            nisn: "0091234567".to_string(),
            name: "Ahmad Fauzi".to_string(),
            ..Default::default()
        })
        .expect("add student");
    store::save_at(home.path(), &dataset).expect("save");
    home
}

fn export_dir(home: &TempDir) -> PathBuf {
    paths::exports_dir(home.path())
}

fn export_all(home: &TempDir) {
    waliadmin_cmd(home.path())
        .args(["export", "--all", "--date", DATE])
        .assert()
        .success();
}

#[test]
fn diff_shows_dataset_change_as_added_line() {
    let home = init_home();
    export_all(&home);

    let mut dataset = store::load_at(home.path()).expect("load");
    dataset.add_grade(GradeEntry {
        student_id: StudentId::from("s1"),
        score: 91.0,
        ..Default::default()
    });
    store::save_at(home.path(), &dataset).expect("save");

    let assert = waliadmin_cmd(home.path())
        .args(["diff", "grade_recap", "--date", DATE])
        .assert()
        .success()
        .stdout(contains("91.0"));
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("stdout utf8");

    assert!(
        stdout
            .lines()
            .any(|line| line.starts_with('+') && line.contains("91.0")),
        "expected an added line carrying the new average"
    );
    assert!(stdout.contains("--- a/grade_recap.html"));
}

#[test]
fn diff_after_export_reports_no_differences() {
    let home = init_home();
    export_all(&home);

    waliadmin_cmd(home.path())
        .args(["diff", "--date", DATE])
        .assert()
        .success()
        .stdout(contains("No differences"));
}

#[test]
fn status_json_lists_every_document_with_expected_status_and_schema() {
    let home = init_home();
    export_all(&home);

    fs::write(export_dir(&home).join("guidance_log.html"), "<p>diedit</p>\n").expect("edit");
    fs::remove_file(export_dir(&home).join("student_list.html")).expect("remove");

    let assert = waliadmin_cmd(home.path())
        .args(["status", "--json"])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("stdout utf8");
    let payload: serde_json::Value = serde_json::from_str(&stdout).expect("parse status json");

    let top_keys: BTreeSet<String> = payload
        .as_object()
        .expect("status root object")
        .keys()
        .cloned()
        .collect();
    let expected_top: BTreeSet<String> = ["summary", "export_dir", "last_export_at", "documents"]
        .into_iter()
        .map(str::to_string)
        .collect();
    assert_eq!(top_keys, expected_top, "status root schema changed");
    assert_eq!(payload["summary"]["students"], 1);
    assert_eq!(payload["summary"]["documents"], 7);

    let rows = payload["documents"].as_array().expect("documents array");
    assert_eq!(rows.len(), 7, "expected every template in status output");

    let mut by_id = HashMap::new();
    for row in rows {
        let keys: BTreeSet<String> = row.as_object().expect("row").keys().cloned().collect();
        let expected: BTreeSet<String> = ["template", "title", "status", "path"]
            .into_iter()
            .map(str::to_string)
            .collect();
        assert_eq!(keys, expected, "document row schema changed");
        by_id.insert(
            row["template"].as_str().expect("id").to_string(),
            row["status"].as_str().expect("status").to_string(),
        );
    }

    assert_eq!(by_id.get("student_list").map(String::as_str), Some("missing"));
    assert_eq!(by_id.get("guidance_log").map(String::as_str), Some("modified"));
    // The cover carries no render date, so it stays current on any day.
    assert_eq!(by_id.get("cover").map(String::as_str), Some("current"));
}

#[test]
fn status_before_export_is_never_exported() {
    let home = init_home();
    waliadmin_cmd(home.path())
        .arg("status")
        .assert()
        .success()
        .stdout(contains("NEVER EXPORTED"))
        .stdout(contains("waliadmin export --all"));
}

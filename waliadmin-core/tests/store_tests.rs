//! Dataset store error-message, atomic-write-safety, and init integration tests.

use assert_fs::prelude::*;
use predicates::prelude::predicate;
use std::fs;

use waliadmin_core::{
    config, paths, store, Dataset, StoreError, StudentId, StudentRecord,
};

fn roster_of(names: &[&str]) -> Dataset {
    let mut ds = Dataset::default();
    for (i, name) in names.iter().enumerate() {
        ds.add_student(StudentRecord {
            id: StudentId::from(format!("s-{i}")),
            name: name.to_string(),
            ..Default::default()
        })
        .expect("add student");
    }
    ds
}

// ---------------------------------------------------------------------------
// 1. Load error messages
// ---------------------------------------------------------------------------

#[test]
fn load_missing_dataset_mentions_path_and_init() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    let err = store::load_at(home.path()).unwrap_err();
    assert!(matches!(err, StoreError::DatasetNotFound { .. }), "got: {err}");
    let msg = err.to_string();
    assert!(msg.contains("data.json"), "must contain file path, got: {msg}");
    assert!(msg.contains("waliadmin init"));
}

#[test]
fn load_corrupt_json_returns_parse_error_with_path() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    home.child(".waliadmin/data.json")
        .write_str("{\"students\": [ {\"id\": ")
        .expect("write");

    let err = store::load_at(home.path()).unwrap_err();
    assert!(matches!(err, StoreError::Parse { .. }), "got: {err}");
    let msg = err.to_string();
    assert!(msg.contains("data.json"), "must contain file path, got: {msg}");
    let source_msg = match &err {
        StoreError::Parse { source, .. } => source.to_string(),
        _ => unreachable!(),
    };
    assert!(source_msg.contains("line"), "serde_json must provide line context");
}

#[test]
fn load_wrong_shape_returns_parse_error() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    home.child(".waliadmin/data.json")
        .write_str("[\"this is a list, not a document\"]")
        .expect("write");

    let err = store::load_at(home.path()).unwrap_err();
    assert!(matches!(err, StoreError::Parse { .. }), "got: {err}");
}

#[test]
fn malformed_config_reports_path() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    home.child(".waliadmin/config.yaml")
        .write_str("output_dir: [unclosed")
        .expect("write");

    let err = config::load_at(home.path()).unwrap_err();
    assert!(matches!(err, StoreError::ConfigParse { .. }), "got: {err}");
    assert!(err.to_string().contains("config.yaml"));
}

// ---------------------------------------------------------------------------
// 2. Atomic write safety
// ---------------------------------------------------------------------------

#[test]
fn mid_write_crash_leaves_original_intact() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    store::save_at(home.path(), &roster_of(&["Ani", "Budi"])).expect("save");

    let path = paths::dataset_path(home.path());
    let original = fs::read(&path).expect("read original");

    // Simulate crash: .tmp written but process died before rename.
    fs::write(path.with_extension("json.tmp"), b"CRASH - INCOMPLETE WRITE").expect("write tmp");

    let loaded = store::load_at(home.path()).expect("load after crash");
    assert_eq!(loaded.students.len(), 2);
    assert_eq!(fs::read(&path).expect("reread"), original);
}

#[test]
fn save_overwrites_stale_tmp_and_cleans_up() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    let path = paths::dataset_path(home.path());
    fs::create_dir_all(path.parent().unwrap()).expect("mkdir");
    fs::write(path.with_extension("json.tmp"), b"leftover").expect("write tmp");

    store::save_at(home.path(), &roster_of(&["Citra"])).expect("save");
    home.child(".waliadmin/data.json.tmp")
        .assert(predicate::path::missing());
    home.child(".waliadmin/data.json")
        .assert(predicate::str::contains("Citra"));
}

#[cfg(unix)]
#[test]
fn saved_dataset_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let home = assert_fs::TempDir::new().expect("tempdir");
    store::save_at(home.path(), &Dataset::default()).expect("save");
    let mode = fs::metadata(paths::dataset_path(home.path()))
        .expect("metadata")
        .permissions()
        .mode()
        & 0o777;
    assert_eq!(mode, 0o600);
}

// ---------------------------------------------------------------------------
// 3. Init
// ---------------------------------------------------------------------------

#[test]
fn init_creates_empty_document() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    let ds = store::init_at(home.path()).expect("init");
    assert!(ds.students.is_empty());
    home.child(".waliadmin/data.json")
        .assert(predicate::path::exists());
    home.child(".waliadmin/data.json")
        .assert(predicate::str::contains("\"achievements\""));
}

#[test]
fn init_does_not_overwrite_existing_data() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    store::save_at(home.path(), &roster_of(&["Dewi"])).expect("save");
    let ds = store::init_at(home.path()).expect("init");
    assert_eq!(ds.students[0].name, "Dewi");
}

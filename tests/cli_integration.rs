use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn docref(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("docref").unwrap();
    cmd.current_dir(dir);
    cmd
}

fn create_record(dir: &Path, data: &serde_json::Value) -> String {
    let record_path = dir.join("record.json");
    std::fs::write(&record_path, data.to_string()).unwrap();

    let assert = docref(dir).arg("create").arg(&record_path).assert().success();

    // "Created record <uuid>"
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    stdout.trim().rsplit(' ').next().unwrap().to_string()
}

#[test]
fn test_init_creates_the_store() {
    let temp_dir = tempfile::tempdir().unwrap();

    docref(temp_dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicates::str::contains("Initialized record store"));

    assert!(temp_dir.path().join(".docref").join("config.json").exists());
}

#[test]
fn test_document_lifecycle_through_the_binary() {
    let temp_dir = tempfile::tempdir().unwrap();
    let file_path = temp_dir.path().join("report.txt");
    std::fs::write(&file_path, "hello").unwrap();

    let id = create_record(
        temp_dir.path(),
        &serde_json::json!({
            "title": "quarterly report",
            "document": {"uri": file_path.to_str().unwrap()}
        }),
    );

    docref(temp_dir.path())
        .arg("ls")
        .assert()
        .success()
        .stdout(predicates::str::contains("quarterly report"));

    docref(temp_dir.path())
        .arg("cat")
        .arg(&id)
        .assert()
        .success()
        .stdout(predicates::str::contains("hello"));

    docref(temp_dir.path())
        .arg("setcontents")
        .arg(&id)
        .write_stdin("done")
        .assert()
        .success()
        .stdout(predicates::str::contains("Wrote contents"));
    assert_eq!(std::fs::read_to_string(&file_path).unwrap(), "done");

    let copy_path = temp_dir.path().join("copy.txt");
    docref(temp_dir.path())
        .arg("cp")
        .arg(&id)
        .arg(copy_path.to_str().unwrap())
        .assert()
        .success()
        .stdout(predicates::str::contains("\"op\": \"replace\""));
    assert_eq!(std::fs::read_to_string(&copy_path).unwrap(), "done");

    let moved_path = temp_dir.path().join("moved.txt");
    docref(temp_dir.path())
        .arg("mv")
        .arg(&id)
        .arg(moved_path.to_str().unwrap())
        .assert()
        .success()
        .stdout(predicates::str::contains("Moved document"));
    assert!(!file_path.exists());
    assert!(moved_path.exists());

    docref(temp_dir.path())
        .arg("show")
        .arg(&id)
        .assert()
        .success()
        .stdout(predicates::str::contains("moved.txt"));

    docref(temp_dir.path())
        .arg("rm")
        .arg(&id)
        .arg("--force")
        .assert()
        .success()
        .stdout(predicates::str::contains("Deleted file and cleared reference"));
    assert!(!moved_path.exists());
}

#[test]
fn test_id_prefix_is_enough() {
    let temp_dir = tempfile::tempdir().unwrap();
    let id = create_record(temp_dir.path(), &serde_json::json!({"title": "by prefix"}));

    docref(temp_dir.path())
        .arg("show")
        .arg(&id[..8])
        .assert()
        .success()
        .stdout(predicates::str::contains("by prefix"));
}

#[test]
fn test_deleted_records_only_list_with_the_flag() {
    let temp_dir = tempfile::tempdir().unwrap();
    let id = create_record(temp_dir.path(), &serde_json::json!({"title": "ephemeral"}));

    docref(temp_dir.path())
        .arg("delete")
        .arg(&id)
        .assert()
        .success()
        .stdout(predicates::str::contains("Deleted record"));

    docref(temp_dir.path())
        .arg("ls")
        .assert()
        .success()
        .stdout(predicates::str::contains("ephemeral").not());

    docref(temp_dir.path())
        .arg("ls")
        .arg("--deleted")
        .assert()
        .success()
        .stdout(predicates::str::contains("ephemeral"));
}

#[test]
fn test_unknown_record_fails_with_an_error() {
    let temp_dir = tempfile::tempdir().unwrap();

    docref(temp_dir.path())
        .arg("show")
        .arg("deadbeef")
        .assert()
        .failure()
        .stderr(predicates::str::contains("Error:"));
}

#[test]
fn test_rm_without_force_keeps_the_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let file_path = temp_dir.path().join("kept.txt");
    std::fs::write(&file_path, "still here").unwrap();

    let id = create_record(
        temp_dir.path(),
        &serde_json::json!({
            "title": "kept",
            "document": {"uri": file_path.to_str().unwrap()}
        }),
    );

    docref(temp_dir.path())
        .arg("rm")
        .arg(&id)
        .assert()
        .success()
        .stdout(predicates::str::contains("Cleared document reference"));

    assert!(file_path.exists());
    docref(temp_dir.path())
        .arg("show")
        .arg(&id)
        .assert()
        .success()
        .stdout(predicates::str::contains("null"));
}

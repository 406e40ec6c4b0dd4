//! End-to-end tests for the interactive prompt

use assert_cmd::Command;
use predicates::prelude::*;

fn lineage_cmd(data_dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("lineage").unwrap();
    cmd.arg("--data-dir").arg(data_dir).arg("--quiet");
    cmd
}

#[test]
fn test_build_family_and_find_path() {
    let dir = tempfile::tempdir().unwrap();
    lineage_cmd(dir.path())
        .write_stdin(
            "new Father m\n\
             new Mother f\n\
             new Child m 0 1\n\
             sp 0 1\n\
             adds 0 1\n\
             sp 0 1\n\
             exit!\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("Father -> Child -> Mother"))
        .stdout(predicate::str::contains("Father -> Mother"));
}

#[test]
fn test_core_error_keeps_prompt_alive() {
    let dir = tempfile::tempdir().unwrap();
    lineage_cmd(dir.path())
        .write_stdin(
            "new Adam m\n\
             new Bert m\n\
             adds 0 1\n\
             showall\n\
             exit!\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "one male and one female",
        ))
        .stdout(predicate::str::contains("2 persons:"));
}

#[test]
fn test_save_then_load_newest_snapshot() {
    let dir = tempfile::tempdir().unwrap();

    lineage_cmd(dir.path())
        .write_stdin("new Ada f\nsave\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved to"));

    lineage_cmd(dir.path())
        .write_stdin("load\nshowall\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("loaded 1 persons and 0 relations"))
        .stdout(predicate::str::contains("Ada"));
}

#[test]
fn test_exit_guards_unsaved_changes() {
    let dir = tempfile::tempdir().unwrap();
    lineage_cmd(dir.path())
        .write_stdin("new Eve f\nexit\nexit!\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Unsaved changes"));
}

#[test]
fn test_unknown_command_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    lineage_cmd(dir.path())
        .write_stdin("frobnicate\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Unknown command: frobnicate"));
}

#![cfg(unix)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
//! Tests for the revmirror binary: arguments, exit codes, diagnostics

mod common;

use assert_cmd::Command;
use common::{running_as_root, write_file};
use predicates::prelude::*;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use tempfile::TempDir;

fn revmirror() -> Command {
    Command::cargo_bin("revmirror").unwrap()
}

#[test]
fn test_mirror_into_working_directory() {
    let temp_dir = TempDir::new().unwrap();
    let src = temp_dir.path().join("input");
    write_file(&src, "a.txt", b"abc");
    write_file(&src, "sub/b.txt", b"xyz");
    let work = temp_dir.path().join("work");
    fs::create_dir(&work).unwrap();

    revmirror().current_dir(&work).arg(&src).assert().success();

    assert_eq!(fs::read(work.join("tupni/txt.a")).unwrap(), b"cba");
    assert_eq!(fs::read(work.join("tupni/bus/txt.b")).unwrap(), b"zyx");
    let created: Vec<_> = fs::read_dir(&work).unwrap().collect();
    assert_eq!(created.len(), 1);
}

#[test]
fn test_relative_source_with_trailing_slash() {
    let temp_dir = TempDir::new().unwrap();
    write_file(temp_dir.path(), "logs/today", b"12345");

    revmirror()
        .current_dir(temp_dir.path())
        .arg("logs/")
        .arg("--output-dir")
        .arg("out")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Output directory"));

    fs::create_dir(temp_dir.path().join("out")).unwrap();
    revmirror()
        .current_dir(temp_dir.path())
        .args(["logs/", "-C", "out"])
        .assert()
        .success();
    assert_eq!(
        fs::read(temp_dir.path().join("out/sgol/yadot")).unwrap(),
        b"54321"
    );
}

#[test]
fn test_missing_argument_is_usage_error() {
    revmirror()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_too_many_arguments_is_usage_error() {
    revmirror()
        .args(["one", "two"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_file_source_fails() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_file(temp_dir.path(), "plain.txt", b"x");

    revmirror()
        .current_dir(temp_dir.path())
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be a directory"));
}

#[test]
fn test_nonexistent_source_fails() {
    let temp_dir = TempDir::new().unwrap();
    revmirror()
        .current_dir(temp_dir.path())
        .arg("does-not-exist")
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_failure_names_offending_path() {
    if running_as_root() {
        eprintln!("Skipping: permission checks do not apply to root");
        return;
    }
    let temp_dir = TempDir::new().unwrap();
    let src = temp_dir.path().join("src");
    let locked = write_file(&src, "locked.bin", b"secret");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
    let work = temp_dir.path().join("work");
    fs::create_dir(&work).unwrap();

    revmirror()
        .current_dir(&work)
        .arg(&src)
        .assert()
        .failure()
        .stderr(predicate::str::contains("locked.bin"))
        .stderr(predicate::str::contains("permission denied"));
}

#[test]
fn test_destination_conflict_names_offending_path() {
    let temp_dir = TempDir::new().unwrap();
    let src = temp_dir.path().join("src");
    write_file(&src, "a_first.txt", b"first");
    write_file(&src, "b_dir/inner.txt", b"inner");
    let work = temp_dir.path().join("work");
    write_file(&work, "crs/rid_b", b"in the way");

    revmirror()
        .current_dir(&work)
        .arg(&src)
        .assert()
        .failure()
        .stderr(predicate::str::contains("rid_b"))
        .stderr(predicate::str::contains("Not a directory"));

    assert_eq!(fs::read(work.join("crs/txt.tsrif_a")).unwrap(), b"tsrif");
}

#[test]
fn test_invalid_options_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let src = temp_dir.path().join("src");
    fs::create_dir(&src).unwrap();

    revmirror()
        .current_dir(temp_dir.path())
        .args(["--chunk-size", "0"])
        .arg(&src)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Chunk size"));

    revmirror()
        .current_dir(temp_dir.path())
        .args(["-q", "-v"])
        .arg(&src)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--quiet"));

    revmirror()
        .current_dir(temp_dir.path())
        .args(["--name-mode", "words"])
        .arg(&src)
        .assert()
        .failure();
}

#[test]
fn test_verbose_logs_summary() {
    let temp_dir = TempDir::new().unwrap();
    let src = temp_dir.path().join("src");
    write_file(&src, "f", b"1");

    revmirror()
        .current_dir(temp_dir.path())
        .arg("-v")
        .arg(&src)
        .assert()
        .success()
        .stderr(predicate::str::contains("Mirror completed"));
}

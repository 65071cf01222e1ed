//! Command-line behaviour of the built binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use super::helpers::{caption_dir, HELLO_WORLD_JSON};

/// The binary with config lookups pointed at an empty directory.
fn segtype(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("segtype").expect("binary should build");
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env("HOME", config_home.path())
        .env_remove("SEGTYPE_LOG");
    cmd
}

#[test]
fn help_lists_subcommands() {
    let home = TempDir::new().unwrap();
    segtype(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("practice"))
        .stdout(predicate::str::contains("segments"))
        .stdout(predicate::str::contains("locate"));
}

#[test]
fn segments_prints_sorted_table() {
    let home = TempDir::new().unwrap();
    let dir = caption_dir(&[("talk", HELLO_WORLD_JSON)]);

    segtype(&home)
        .args(["segments", "talk", "--dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"(?s)0\s+0 - 2000\s+hello.*1\s+2000 - 5000\s+world").unwrap())
        .stdout(predicate::str::contains("2 segments"));
}

#[test]
fn segments_json_uses_segment_fields() {
    let home = TempDir::new().unwrap();
    let dir = caption_dir(&[("talk", HELLO_WORLD_JSON)]);
    let file = dir.path().join("talk.json");

    let output = segtype(&home)
        .args(["segments", "--json"])
        .arg(&file)
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value[0]["start_ms"], 0);
    assert_eq!(value[0]["text"], "hello");
    assert_eq!(value[1]["duration_ms"], 3000);
}

#[test]
fn locate_reports_active_segment() {
    let home = TempDir::new().unwrap();
    let dir = caption_dir(&[("talk", HELLO_WORLD_JSON)]);

    segtype(&home)
        .args(["locate", "talk", "2500", "--dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("1\t2000-5000\tworld"));
}

#[test]
fn locate_past_the_end_reports_no_segment() {
    let home = TempDir::new().unwrap();
    let dir = caption_dir(&[("talk", HELLO_WORLD_JSON)]);

    segtype(&home)
        .args(["locate", "talk", "5000", "--dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("no segment"));
}

#[test]
fn missing_captions_print_no_segments_and_warn() {
    let home = TempDir::new().unwrap();
    let dir = caption_dir(&[]);

    segtype(&home)
        .args(["segments", "absent", "--dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("no segments"))
        .stderr(predicate::str::contains("caption retrieval failed"));
}

#[test]
fn config_show_prints_defaults() {
    let home = TempDir::new().unwrap();
    segtype(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("progress_interval_ms = 100"))
        .stdout(predicate::str::contains("autoplay = true"));
}

#[test]
fn config_init_writes_defaults_once() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("segtype").join("config.toml");

    segtype(&home)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("progress_interval_ms = 100"));

    std::fs::write(&path, "[player]\nautoplay = false\n").unwrap();
    segtype(&home)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "[player]\nautoplay = false\n"
    );
}

#[test]
fn completions_generate_for_bash() {
    let home = TempDir::new().unwrap();
    segtype(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("segtype"));
}

#[test]
fn unknown_subcommand_fails() {
    let home = TempDir::new().unwrap();
    segtype(&home).arg("transcode").assert().failure();
}

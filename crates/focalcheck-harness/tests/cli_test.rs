//! Integration test: `focalcheck` command line.
//!
//! Run: cargo test -p focalcheck-harness --test cli_test

use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn unique_tmp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time should be after UNIX_EPOCH")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("{prefix}-{}-{nanos}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn focalcheck() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_focalcheck"));
    cmd.env_remove("FOCALCHECK_LOG").env_remove("FOCALCHECK_VERBOSE");
    cmd
}

#[test]
fn list_names_every_suite() {
    let output = focalcheck().arg("list").output().expect("focalcheck list");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for name in [
        "pcap_mac8host",
        "unity_float_special",
        "unity_int_array",
        "png_component_loc",
        "sqlite_cache_size",
        "zip_get_short",
        "lcms_float_output_tag",
    ] {
        assert!(stdout.contains(name), "list output missing {name}");
    }
}

#[test]
fn run_writes_log_and_artifact_index() {
    let dir = unique_tmp_dir("focalcheck-cli-run");
    let log_path = dir.join("logs/run.jsonl");
    let index_path = dir.join("artifact_index.json");

    let output = focalcheck()
        .args(["run", "--suite", "zip_get_short", "--run-id", "cli-run"])
        .arg("--log")
        .arg(&log_path)
        .arg("--artifact-index")
        .arg(&index_path)
        .output()
        .expect("focalcheck run");
    assert_eq!(output.status.code(), Some(0), "{output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[PASS] zip_get_short::reads_little_endian"));
    assert!(stdout.contains("ALL PASSED"));

    let index: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&index_path).expect("index written"))
            .expect("index is JSON");
    assert_eq!(index["run_id"], "cli-run");
    let sha = index["artifacts"][0]["sha256"].as_str().expect("sha256");
    assert_eq!(sha.len(), 64);

    let validate = focalcheck()
        .arg("validate-log")
        .arg("--log")
        .arg(&log_path)
        .output()
        .expect("focalcheck validate-log");
    assert!(validate.status.success(), "{validate:?}");

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn unknown_suite_exits_two() {
    let output = focalcheck()
        .args(["run", "--suite", "no_such_suite"])
        .output()
        .expect("focalcheck run");
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown suite 'no_such_suite'"));
}

#[test]
fn invalid_log_exits_one() {
    let dir = unique_tmp_dir("focalcheck-cli-badlog");
    let log_path = dir.join("bad.jsonl");
    std::fs::write(&log_path, "{\"level\":\"loud\"}\nnot json\n").expect("write log");

    let output = focalcheck()
        .arg("validate-log")
        .arg("--log")
        .arg(&log_path)
        .output()
        .expect("focalcheck validate-log");
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("schema problem"));

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn skip_reports_named_scenario() {
    let output = focalcheck()
        .args(["run", "--suite", "zip_get_short"])
        .args(["--skip", "zip_get_short::empty_stream"])
        .output()
        .expect("focalcheck run");
    assert_eq!(output.status.code(), Some(0), "{output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[SKIP] zip_get_short::empty_stream"));
    assert!(stdout.contains("[PASS] zip_get_short::sequential_reads"));
}

#[test]
fn dash_log_streams_jsonl_on_stdout() {
    let output = focalcheck()
        .args(["run", "--suite", "sqlite_cache_size", "--log", "-", "--run-id", "cli-stdout"])
        .output()
        .expect("focalcheck run");
    assert_eq!(output.status.code(), Some(0), "{output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let (lines, problems) = focalcheck_harness::structured_log::validate_log_text(&stdout);
    assert!(problems.is_empty(), "{problems:?}");
    assert!(lines >= 3);
    assert!(stdout.lines().all(|l| l.contains("cli-stdout::")));
    assert!(String::from_utf8_lossy(&output.stderr).contains("ALL PASSED"));
}

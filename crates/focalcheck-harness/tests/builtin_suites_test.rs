//! Integration test: built-in focal suites.
//!
//! Validates that:
//! 1. Every built-in suite passes against the focal ports.
//! 2. The JSONL log of a full run satisfies the line schema.
//! 3. The gen_mac8host decision table loads from disk.
//!
//! Run: cargo test -p focalcheck-harness --test builtin_suites_test

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use focalcheck_harness::structured_log::{LogEmitter, validate_log_file, validate_log_text};
use focalcheck_harness::{FixtureSet, Outcome, SuiteRunner, suites};

fn unique_tmp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time should be after UNIX_EPOCH")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("{prefix}-{}-{nanos}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

#[test]
fn all_builtin_suites_pass() {
    let summary = SuiteRunner::new("builtin")
        .quiet()
        .run(&suites::all())
        .expect("run without log");

    for suite in &summary.suites {
        for result in &suite.results {
            assert_eq!(
                result.outcome,
                Outcome::Pass,
                "{}::{} failed: {:?}",
                suite.suite,
                result.scenario,
                result.failure_records
            );
            assert!(result.checks > 0, "{}::{} checked nothing", suite.suite, result.scenario);
        }
    }
    assert_eq!(summary.suites.len(), 7);
    assert_eq!(summary.exit_code(), 0);
}

#[test]
fn buffered_run_log_is_schema_valid() {
    let mut runner = SuiteRunner::new("schema")
        .quiet()
        .with_emitter(LogEmitter::to_buffer("schema"));
    let selected = suites::select(&["png_component_loc".to_string()]).expect("known suite");
    runner.run(&selected).expect("run");

    let text = runner
        .emitter()
        .and_then(LogEmitter::buffered)
        .expect("buffer sink");
    let (lines, problems) = validate_log_text(text);
    assert!(problems.is_empty(), "schema problems: {problems:?}");
    assert_eq!(lines, selected[0].scenarios.len() + 2);
}

#[test]
fn file_log_is_schema_valid() {
    let dir = unique_tmp_dir("focalcheck-file-log");
    let log_path = dir.join("run.jsonl");
    let mut runner = SuiteRunner::new("file-log")
        .quiet()
        .with_emitter(LogEmitter::to_file(&log_path, "file-log").expect("open log"));
    runner.run(&suites::all()).expect("run");
    drop(runner.take_emitter());

    let (lines, problems) = validate_log_file(&log_path).expect("read log");
    assert!(problems.is_empty(), "schema problems: {problems:?}");
    let scenarios: usize = suites::all().iter().map(|s| s.scenarios.len()).sum();
    assert_eq!(lines, scenarios + 2);

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn mac8host_fixture_loads_from_disk() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/mac8host_offsets.v1.json");
    let set = FixtureSet::from_file(&path).expect("fixture should parse");
    assert_eq!(set.version, "v1");
    assert_eq!(set.focal, "gen_mac8host");
    assert!(set.cases.iter().any(|c| c.name == "raw_unsupported"));
    for case in &set.cases {
        let success = case.expected_bool("success").expect("success flag");
        if success {
            assert!(case.expected_i64("src_off").is_some(), "{}", case.name);
        }
    }
}

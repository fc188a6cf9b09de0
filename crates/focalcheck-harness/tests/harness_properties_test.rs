//! Integration test: harness contracts.
//!
//! Validates that:
//! 1. A failing check bumps the failure count exactly once and does not stop
//!    the scenario.
//! 2. Every scenario of a suite runs even when an earlier one fails.
//! 3. Resetting a double leaves it indistinguishable from a fresh one, so the
//!    next scenario starts clean.
//! 4. Expected crashes are intercepted and the run continues.
//!
//! Run: cargo test -p focalcheck-harness --test harness_properties_test

use focalcheck_harness::crash::expect_crash;
use focalcheck_harness::mock::{CallLog, Stub};
use focalcheck_harness::{
    CheckContext, Outcome, Scenario, SetupError, Suite, SuiteRunner, expect_eq, expect_true,
};

#[test]
fn failing_check_counts_exactly_once() {
    let mut ctx = CheckContext::new("props::count");
    let before = ctx.failures();
    let passed = expect_eq!(ctx, 40 + 1, 42, "answer");
    assert!(!passed);
    assert_eq!(ctx.failures() - before, 1);

    expect_true!(ctx, 1 < 2);
    assert_eq!(ctx.failures(), 1, "a later passing check leaves the count alone");
    assert_eq!(ctx.checks(), 2);

    let failure = &ctx.failure_records()[0];
    assert_eq!(failure.expected.as_deref(), Some("42"));
    assert_eq!(failure.actual.as_deref(), Some("41"));
    assert_eq!(failure.message.as_deref(), Some("answer"));
    assert!(failure.line > 0);
}

fn fails_early(ctx: &mut CheckContext) -> Result<(), SetupError> {
    expect_eq!(ctx, 1, 2);
    Ok(())
}

fn panics_in_middle(_ctx: &mut CheckContext) -> Result<(), SetupError> {
    let values: Vec<u8> = Vec::new();
    let _ = values[3];
    Ok(())
}

fn passes_late(ctx: &mut CheckContext) -> Result<(), SetupError> {
    expect_true!(ctx, true);
    Ok(())
}

#[test]
fn all_scenarios_run_after_a_failure() {
    let suite = Suite {
        name: "props",
        library: "none",
        focal: "none",
        scenarios: vec![
            Scenario::new("fails_early", "", fails_early),
            Scenario::new("panics_in_middle", "", panics_in_middle),
            Scenario::new("passes_late", "", passes_late),
            Scenario::new("passes_again", "", passes_late),
        ],
    };
    let summary = SuiteRunner::new("props")
        .quiet()
        .run(&[suite])
        .expect("run without log");

    let results = &summary.suites[0].results;
    assert_eq!(results.len(), 4);
    assert_eq!(results[0].outcome, Outcome::Fail);
    assert_eq!(results[1].outcome, Outcome::Error);
    assert_eq!(results[2].outcome, Outcome::Pass);
    assert_eq!(results[3].outcome, Outcome::Pass);
    assert_eq!(summary.total_failures(), 2);
    assert_eq!(summary.exit_code(), 1);
}

#[test]
fn stub_reset_matches_fresh_stub() {
    let stub: Stub<(i32, u8), i32> = Stub::returning(0);
    stub.then_return(-1).then_return(-2);
    stub.set_fallback(7);
    assert_eq!(stub.invoke((1, 2)), -1);
    assert_eq!(stub.invoke((3, 4)), -2);
    assert_eq!(stub.invoke((5, 6)), 7);
    assert_eq!(stub.count(), 3);

    stub.reset();
    let fresh: Stub<(i32, u8), i32> = Stub::returning(0);
    assert_eq!(stub.snapshot(), fresh.snapshot());

    // second reset is a no-op
    stub.reset();
    assert_eq!(stub.snapshot(), fresh.snapshot());
    assert_eq!(stub.invoke((9, 9)), 0);
}

#[test]
fn call_log_reset_forgets_everything() {
    let log: CallLog<&str> = CallLog::new();
    log.record("open");
    log.record("read");
    assert_eq!(log.last(), Some("read"));
    log.reset();
    assert_eq!(log.count(), 0);
    assert_eq!(log.last(), None);
    assert!(log.calls().is_empty());
}

#[test]
fn expected_crash_is_contained() {
    let mut ctx = CheckContext::new("props::crash");
    let caught = expect_crash(&mut ctx, "assert", || -> u8 { panic!("precondition violated") });
    assert!(caught);
    let missed = expect_crash(&mut ctx, "no crash", || 5u8);
    assert!(!missed);
    assert_eq!(ctx.checks(), 2);
    assert_eq!(ctx.failures(), 1);
    assert!(ctx.failure_records()[0].file.ends_with("harness_properties_test.rs"));
}

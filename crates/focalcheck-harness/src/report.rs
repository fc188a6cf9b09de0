//! Human-readable run reports.

use std::fmt::Write as _;

use crate::driver::{Outcome, RunSummary, ScenarioResult, Suite};

/// One line per scenario, printed as the run progresses.
#[must_use]
pub fn render_scenario_line(suite: &str, result: &ScenarioResult) -> String {
    let tag = match result.outcome {
        Outcome::Pass => "PASS",
        Outcome::Fail => "FAIL",
        Outcome::Error => "ERROR",
        Outcome::Skip => "SKIP",
    };
    let mut line = format!("[{tag}] {suite}::{}", result.scenario);
    if result.failures > 0 {
        let _ = write!(line, " ({}/{} checks failed)", result.failures, result.checks);
    }
    if let Some(error) = &result.error {
        let _ = write!(line, ": {error}");
    }
    line
}

/// Per-suite table plus the overall verdict.
#[must_use]
pub fn render_summary(summary: &RunSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== focalcheck summary ({}) ==", summary.run_id);
    for suite in &summary.suites {
        let _ = writeln!(
            out,
            "{:<24} {:<10} {:<32} {}/{} scenarios, {} failed checks",
            suite.suite,
            suite.library,
            suite.focal,
            suite.scenarios_passed(),
            suite.results.len(),
            suite.failures(),
        );
    }
    let verdict = if summary.exit_code() == 0 {
        "ALL PASSED"
    } else {
        "FAILURES"
    };
    let _ = writeln!(
        out,
        "{verdict}: {} scenarios, {} checks, {} failed",
        summary.scenarios_run(),
        summary.total_checks(),
        summary.total_failures(),
    );
    out
}

/// Listing for `focalcheck list`.
#[must_use]
pub fn render_suite_list(suites: &[Suite]) -> String {
    let mut out = String::new();
    for suite in suites {
        let _ = writeln!(
            out,
            "{:<24} {:<10} {:<32} {} scenarios",
            suite.name,
            suite.library,
            suite.focal,
            suite.scenarios.len()
        );
        for scenario in &suite.scenarios {
            let _ = writeln!(out, "    {:<36} {}", scenario.name, scenario.description);
        }
    }
    out
}

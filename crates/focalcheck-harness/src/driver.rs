//! Scenario driver.
//!
//! Runs every scenario of every selected suite, in order, on the calling
//! thread. Each scenario gets a fresh [`CheckContext`] and builds its own
//! doubles, so nothing carries over from one scenario to the next. A failed
//! check, a setup error or an unexpected panic only affects the scenario it
//! happened in. Scenarios named in the skip list are reported as skipped
//! without running.

use std::time::Instant;

use serde::Serialize;

use crate::check::{CheckContext, Failure};
use crate::config::HarnessConfig;
use crate::crash::catch_crash;
use crate::error::{HarnessError, SetupError};
use crate::report;
pub use crate::structured_log::Outcome;
use crate::structured_log::{LogEmitter, LogEntry, LogLevel};

/// Body of one scenario.
pub type ScenarioFn = fn(&mut CheckContext) -> Result<(), SetupError>;

/// One test case exercising one branch of a focal method.
#[derive(Clone, Copy)]
pub struct Scenario {
    pub name: &'static str,
    pub description: &'static str,
    pub run: ScenarioFn,
}

impl Scenario {
    pub const fn new(name: &'static str, description: &'static str, run: ScenarioFn) -> Self {
        Self {
            name,
            description,
            run,
        }
    }
}

impl std::fmt::Debug for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scenario")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// All scenarios for one focal method.
#[derive(Debug, Clone)]
pub struct Suite {
    pub name: &'static str,
    pub library: &'static str,
    pub focal: &'static str,
    pub scenarios: Vec<Scenario>,
}

/// What happened in one scenario.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    pub scenario: String,
    pub outcome: Outcome,
    pub checks: u32,
    pub failures: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failure_records: Vec<Failure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub duration_ms: u64,
}

/// Results of one suite.
#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
    pub suite: String,
    pub library: String,
    pub focal: String,
    pub results: Vec<ScenarioResult>,
}

impl SuiteReport {
    #[must_use]
    pub fn failures(&self) -> u32 {
        self.results.iter().map(|r| r.failures).sum()
    }

    #[must_use]
    pub fn checks(&self) -> u32 {
        self.results.iter().map(|r| r.checks).sum()
    }

    /// Scenarios without any failure.
    #[must_use]
    pub fn scenarios_passed(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.outcome == Outcome::Pass)
            .count()
    }
}

/// Aggregate of a whole run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub run_id: String,
    pub suites: Vec<SuiteReport>,
}

impl RunSummary {
    #[must_use]
    pub fn total_failures(&self) -> u32 {
        self.suites.iter().map(SuiteReport::failures).sum()
    }

    #[must_use]
    pub fn total_checks(&self) -> u32 {
        self.suites.iter().map(SuiteReport::checks).sum()
    }

    #[must_use]
    pub fn scenarios_run(&self) -> usize {
        self.suites.iter().map(|s| s.results.len()).sum()
    }

    /// `0` when no check failed, `1` otherwise.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        i32::from(self.total_failures() != 0)
    }
}

/// Sequential runner over a list of suites.
pub struct SuiteRunner {
    run_id: String,
    verbose: bool,
    echo: bool,
    skip: Vec<String>,
    emitter: Option<LogEmitter>,
}

impl SuiteRunner {
    #[must_use]
    pub fn new(run_id: impl Into<String>) -> Self {
        Self {
            run_id: run_id.into(),
            verbose: false,
            echo: true,
            skip: Vec::new(),
            emitter: None,
        }
    }

    /// Runner set up from a [`HarnessConfig`]; opens the JSONL log if one
    /// is configured. A stdout log turns off the per-scenario lines so stdout
    /// stays pure JSONL.
    pub fn from_config(config: &HarnessConfig) -> Result<Self, HarnessError> {
        let mut runner = Self::new(config.run_id.clone())
            .verbose(config.verbose)
            .skipping(config.skip.clone());
        if config.logs_to_stdout() {
            runner = runner.quiet().with_emitter(LogEmitter::to_stdout(&config.run_id));
        } else if let Some(path) = &config.log_path {
            runner.emitter = Some(LogEmitter::to_file(path, &config.run_id)?);
        }
        Ok(runner)
    }

    /// Print `[PASS]` lines for passing checks.
    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Do not print per-scenario result lines.
    #[must_use]
    pub fn quiet(mut self) -> Self {
        self.echo = false;
        self
    }

    /// Report these `suite::scenario` names as skipped.
    #[must_use]
    pub fn skipping(mut self, skip: Vec<String>) -> Self {
        self.skip = skip;
        self
    }

    #[must_use]
    pub fn with_emitter(mut self, emitter: LogEmitter) -> Self {
        self.emitter = Some(emitter);
        self
    }

    #[must_use]
    pub fn emitter(&self) -> Option<&LogEmitter> {
        self.emitter.as_ref()
    }

    pub fn take_emitter(&mut self) -> Option<LogEmitter> {
        self.emitter.take()
    }

    /// Run every scenario of every suite and summarize.
    ///
    /// Only structured-log I/O errors are returned; scenario failures end up
    /// in the summary.
    pub fn run(&mut self, suites: &[Suite]) -> Result<RunSummary, HarnessError> {
        self.log(LogEntry::new("", LogLevel::Info, "run_start").with_details(
            serde_json::json!({ "suites": suites.iter().map(|s| s.name).collect::<Vec<_>>() }),
        ))?;

        let mut reports = Vec::with_capacity(suites.len());
        for suite in suites {
            let mut results = Vec::with_capacity(suite.scenarios.len());
            for scenario in &suite.scenarios {
                let result = self.run_scenario(suite, scenario);
                if self.echo {
                    println!("{}", report::render_scenario_line(suite.name, &result));
                }
                self.log(
                    LogEntry::new("", level_for(result.outcome), "scenario_end")
                        .with_suite(suite.name, suite.library, suite.focal)
                        .with_scenario(scenario.name)
                        .with_outcome(result.outcome)
                        .with_counts(result.checks, result.failures)
                        .with_duration_ms(result.duration_ms),
                )?;
                results.push(result);
            }
            reports.push(SuiteReport {
                suite: suite.name.to_string(),
                library: suite.library.to_string(),
                focal: suite.focal.to_string(),
                results,
            });
        }

        let summary = RunSummary {
            run_id: self.run_id.clone(),
            suites: reports,
        };
        self.log(
            LogEntry::new("", LogLevel::Info, "run_end")
                .with_counts(summary.total_checks(), summary.total_failures())
                .with_exit_code(summary.exit_code()),
        )?;
        if let Some(emitter) = self.emitter.as_mut() {
            emitter.flush()?;
        }
        Ok(summary)
    }

    fn is_skipped(&self, suite: &Suite, scenario: &Scenario) -> bool {
        self.skip.iter().any(|name| {
            name.split_once("::")
                .is_some_and(|(s, c)| s == suite.name && c == scenario.name)
        })
    }

    fn run_scenario(&self, suite: &Suite, scenario: &Scenario) -> ScenarioResult {
        if self.is_skipped(suite, scenario) {
            return ScenarioResult {
                scenario: scenario.name.to_string(),
                outcome: Outcome::Skip,
                checks: 0,
                failures: 0,
                failure_records: Vec::new(),
                error: None,
                duration_ms: 0,
            };
        }
        let mut ctx = CheckContext::new(format!("{}::{}", suite.name, scenario.name))
            .with_verbose(self.verbose);
        let run = scenario.run;
        let started = Instant::now();
        let outcome = catch_crash(|| run(&mut ctx));
        let duration_ms = started.elapsed().as_millis() as u64;

        let error = match outcome {
            Ok(Ok(())) => None,
            Ok(Err(setup)) => {
                let message = format!("setup failed: {setup}");
                ctx.fail(
                    Failure::new(file!(), line!(), "scenario setup")
                        .with_message(Some(message.clone())),
                );
                Some(message)
            }
            Err(panic) => {
                let message = format!("unexpected panic: {panic}");
                ctx.fail(
                    Failure::new(file!(), line!(), "scenario body")
                        .with_message(Some(message.clone())),
                );
                Some(message)
            }
        };

        let outcome = match (&error, ctx.passed()) {
            (Some(_), _) => Outcome::Error,
            (None, true) => Outcome::Pass,
            (None, false) => Outcome::Fail,
        };
        let checks = ctx.checks();
        let failures = ctx.failures();
        ScenarioResult {
            scenario: scenario.name.to_string(),
            outcome,
            checks,
            failures,
            failure_records: ctx.into_failures(),
            error,
            duration_ms,
        }
    }

    fn log(&mut self, entry: LogEntry) -> Result<(), HarnessError> {
        if let Some(emitter) = self.emitter.as_mut() {
            emitter.emit_entry(entry)?;
        }
        Ok(())
    }
}

fn level_for(outcome: Outcome) -> LogLevel {
    match outcome {
        Outcome::Pass | Outcome::Skip => LogLevel::Info,
        Outcome::Fail => LogLevel::Warn,
        Outcome::Error => LogLevel::Error,
    }
}

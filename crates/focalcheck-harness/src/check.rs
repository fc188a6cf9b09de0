//! Non-terminating checks.
//!
//! A [`CheckContext`] belongs to exactly one scenario run. Every `expect_*!`
//! macro records into it and returns; nothing here panics or unwinds, so a
//! scenario keeps going after a failed check and the driver only looks at
//! the aggregate counts afterwards.

use std::fmt;

use serde::Serialize;

/// One failed check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub file: &'static str,
    pub line: u32,
    pub expression: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Failure {
    #[must_use]
    pub fn new(file: &'static str, line: u32, expression: impl Into<String>) -> Self {
        Self {
            file,
            line,
            expression: expression.into(),
            expected: None,
            actual: None,
            message: None,
        }
    }

    /// Attach the rendered expected and actual values.
    #[must_use]
    pub fn with_values(mut self, expected: impl Into<String>, actual: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self.actual = Some(actual.into());
        self
    }

    #[must_use]
    pub fn with_message(mut self, message: Option<String>) -> Self {
        self.message = message.filter(|m| !m.is_empty());
        self
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.file, self.line, self.expression)?;
        if let (Some(expected), Some(actual)) = (&self.expected, &self.actual) {
            write!(f, " (expected: {expected}, actual: {actual})")?;
        }
        if let Some(message) = &self.message {
            write!(f, " - {message}")?;
        }
        Ok(())
    }
}

/// Failure counter and records for a single scenario.
#[derive(Debug, Clone)]
pub struct CheckContext {
    scenario: String,
    verbose: bool,
    checks: u32,
    failures: Vec<Failure>,
}

impl CheckContext {
    #[must_use]
    pub fn new(scenario: impl Into<String>) -> Self {
        Self {
            scenario: scenario.into(),
            verbose: false,
            checks: 0,
            failures: Vec::new(),
        }
    }

    /// Print a `[PASS]` line for every passing check.
    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    #[must_use]
    pub fn scenario(&self) -> &str {
        &self.scenario
    }

    /// Record the outcome of one check. `failure` is only built when it is
    /// needed for output.
    pub fn check_with(&mut self, passed: bool, failure: impl FnOnce() -> Failure) -> bool {
        self.checks = self.checks.saturating_add(1);
        if passed {
            if self.verbose {
                println!("[PASS] {}: {}", self.scenario, failure().expression);
            }
        } else {
            self.push_failure(failure());
        }
        passed
    }

    /// Record a failure that did not come from a comparison (setup errors,
    /// unexpected panics). Counts as one check.
    pub fn fail(&mut self, failure: Failure) {
        self.checks = self.checks.saturating_add(1);
        self.push_failure(failure);
    }

    fn push_failure(&mut self, failure: Failure) {
        eprintln!("[FAIL] {}: {failure}", self.scenario);
        self.failures.push(failure);
    }

    /// Number of checks recorded so far.
    #[must_use]
    pub fn checks(&self) -> u32 {
        self.checks
    }

    /// Number of failed checks.
    #[must_use]
    pub fn failures(&self) -> u32 {
        u32::try_from(self.failures.len()).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }

    #[must_use]
    pub fn failure_records(&self) -> &[Failure] {
        &self.failures
    }

    pub(crate) fn into_failures(self) -> Vec<Failure> {
        self.failures
    }
}

/// Check that a condition holds.
///
/// `expect_true!(ctx, cond)` or `expect_true!(ctx, cond, "fmt {}", args)`.
#[macro_export]
macro_rules! expect_true {
    ($ctx:expr, $cond:expr $(,)?) => {
        $ctx.check_with($cond, || {
            $crate::check::Failure::new(file!(), line!(), stringify!($cond))
        })
    };
    ($ctx:expr, $cond:expr, $($msg:tt)+) => {
        $ctx.check_with($cond, || {
            $crate::check::Failure::new(file!(), line!(), stringify!($cond))
                .with_message(Some(format!($($msg)+)))
        })
    };
}

/// Check that a condition does not hold.
#[macro_export]
macro_rules! expect_false {
    ($ctx:expr, $cond:expr $(,)?) => {
        $ctx.check_with(!$cond, || {
            $crate::check::Failure::new(file!(), line!(), concat!("!(", stringify!($cond), ")"))
        })
    };
    ($ctx:expr, $cond:expr, $($msg:tt)+) => {
        $ctx.check_with(!$cond, || {
            $crate::check::Failure::new(file!(), line!(), concat!("!(", stringify!($cond), ")"))
                .with_message(Some(format!($($msg)+)))
        })
    };
}

/// Check `actual == expected`, reporting both values on mismatch.
#[macro_export]
macro_rules! expect_eq {
    (@impl $ctx:expr, $actual:expr, $expected:expr, $msg:expr) => {
        match (&$actual, &$expected) {
            (actual, expected) => {
                let passed = *actual == *expected;
                $ctx.check_with(passed, || {
                    $crate::check::Failure::new(
                        file!(),
                        line!(),
                        concat!(stringify!($actual), " == ", stringify!($expected)),
                    )
                    .with_values(format!("{:?}", expected), format!("{:?}", actual))
                    .with_message($msg)
                })
            }
        }
    };
    ($ctx:expr, $actual:expr, $expected:expr $(,)?) => {
        $crate::expect_eq!(@impl $ctx, $actual, $expected, None)
    };
    ($ctx:expr, $actual:expr, $expected:expr, $($msg:tt)+) => {
        $crate::expect_eq!(@impl $ctx, $actual, $expected, Some(format!($($msg)+)))
    };
}

/// Check `actual != unexpected`.
#[macro_export]
macro_rules! expect_ne {
    (@impl $ctx:expr, $actual:expr, $unexpected:expr, $msg:expr) => {
        match (&$actual, &$unexpected) {
            (actual, unexpected) => {
                let passed = *actual != *unexpected;
                $ctx.check_with(passed, || {
                    $crate::check::Failure::new(
                        file!(),
                        line!(),
                        concat!(stringify!($actual), " != ", stringify!($unexpected)),
                    )
                    .with_values(format!("not {:?}", unexpected), format!("{:?}", actual))
                    .with_message($msg)
                })
            }
        }
    };
    ($ctx:expr, $actual:expr, $unexpected:expr $(,)?) => {
        $crate::expect_ne!(@impl $ctx, $actual, $unexpected, None)
    };
    ($ctx:expr, $actual:expr, $unexpected:expr, $($msg:tt)+) => {
        $crate::expect_ne!(@impl $ctx, $actual, $unexpected, Some(format!($($msg)+)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failing_check_counts_once_and_continues() {
        let mut ctx = CheckContext::new("unit");
        let first = expect_eq!(ctx, 2 + 2, 5);
        let second = expect_true!(ctx, true);
        assert!(!first);
        assert!(second);
        assert_eq!(ctx.checks(), 2);
        assert_eq!(ctx.failures(), 1);
    }

    #[test]
    fn eq_failure_renders_both_values() {
        let mut ctx = CheckContext::new("unit");
        expect_eq!(ctx, "abc", "abd", "case {}", 7);
        let failure = &ctx.failure_records()[0];
        assert_eq!(failure.expression, "\"abc\" == \"abd\"");
        assert_eq!(failure.expected.as_deref(), Some("\"abd\""));
        assert_eq!(failure.actual.as_deref(), Some("\"abc\""));
        assert_eq!(failure.message.as_deref(), Some("case 7"));
        assert!(failure.to_string().contains("(expected: \"abd\", actual: \"abc\") - case 7"));
    }

    #[test]
    fn macros_accept_a_mutable_reference() {
        fn scenario(ctx: &mut CheckContext) {
            expect_false!(ctx, 1 > 2);
            expect_ne!(ctx, 3u8, 3u8);
        }
        let mut ctx = CheckContext::new("by-ref");
        scenario(&mut ctx);
        assert_eq!(ctx.checks(), 2);
        assert_eq!(ctx.failures(), 1);
        assert_eq!(ctx.failure_records()[0].expression, "3u8 != 3u8");
    }

    #[test]
    fn failure_count_tracks_records() {
        let mut ctx = CheckContext::new("many");
        for i in 0..300u32 {
            expect_eq!(ctx, i, i + 1);
        }
        assert_eq!(ctx.failures(), 300);
        assert_eq!(ctx.failures() as usize, ctx.failure_records().len());
        assert_eq!(ctx.checks(), 300);
    }

    #[test]
    fn empty_message_is_dropped() {
        let failure = Failure::new("f.rs", 1, "x").with_message(Some(String::new()));
        assert_eq!(failure.message, None);
    }
}

//! Mock + drive + assert harness for focal-method suites.
//!
//! This crate provides:
//! - Non-terminating checks: [`CheckContext`] and the `expect_*!` macros
//! - Test doubles: [`mock::CallLog`], [`mock::Canned`], [`mock::Stub`]
//! - Expected-crash interception: [`crash::expect_crash`]
//! - Scenario driver: [`SuiteRunner`] with per-scenario fresh state
//! - Structured JSONL logging and artifact indexing
//! - Built-in suites for the focal methods in `focalcheck-core`

pub mod check;
pub mod config;
pub mod crash;
pub mod driver;
pub mod error;
pub mod fixtures;
pub mod mock;
pub mod report;
pub mod structured_log;
pub mod suites;

pub use check::{CheckContext, Failure};
pub use config::HarnessConfig;
pub use driver::{Outcome, RunSummary, Scenario, ScenarioResult, Suite, SuiteRunner};
pub use error::{HarnessError, SetupError};
pub use fixtures::{FixtureCase, FixtureSet};

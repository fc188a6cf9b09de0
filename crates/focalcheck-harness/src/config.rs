//! Run configuration.
//!
//! Command-line flags win. When a flag is absent the environment is
//! consulted:
//! - `FOCALCHECK_VERBOSE`: `1`, `true`, `yes` or `on` prints a `[PASS]` line
//!   per passing check. Anything else leaves it off.
//! - `FOCALCHECK_LOG`: path of the JSONL structured log. `-` writes the log
//!   to stdout.

use std::path::PathBuf;

pub const ENV_VERBOSE: &str = "FOCALCHECK_VERBOSE";
pub const ENV_LOG: &str = "FOCALCHECK_LOG";
/// Log path that selects stdout.
pub const STDOUT_LOG: &str = "-";

/// Settings for one `focalcheck run`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HarnessConfig {
    pub verbose: bool,
    pub log_path: Option<PathBuf>,
    pub artifact_index: Option<PathBuf>,
    /// Suites to run; empty means all.
    pub suites: Vec<String>,
    /// `suite::scenario` names reported as skipped instead of run.
    pub skip: Vec<String>,
    pub run_id: String,
}

/// Parse a boolean switch (case-insensitive). Unknown values are `false`.
#[must_use]
pub fn parse_flag_loose(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

impl HarnessConfig {
    /// Configuration from the process environment only.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            verbose: lookup(ENV_VERBOSE).is_some_and(|v| parse_flag_loose(&v)),
            log_path: lookup(ENV_LOG)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            artifact_index: None,
            suites: Vec::new(),
            skip: Vec::new(),
            run_id: default_run_id(),
        }
    }

    /// Overlay command-line values on top of `self`.
    #[must_use]
    pub fn with_cli(
        mut self,
        verbose: bool,
        log_path: Option<PathBuf>,
        artifact_index: Option<PathBuf>,
        suites: Vec<String>,
        run_id: Option<String>,
    ) -> Self {
        self.verbose |= verbose;
        if log_path.is_some() {
            self.log_path = log_path;
        }
        self.artifact_index = artifact_index;
        self.suites = suites;
        if let Some(run_id) = run_id {
            self.run_id = run_id;
        }
        self
    }

    #[must_use]
    pub fn with_skips(mut self, skip: Vec<String>) -> Self {
        self.skip = skip;
        self
    }

    /// Whether the structured log goes to stdout.
    #[must_use]
    pub fn logs_to_stdout(&self) -> bool {
        self.log_path
            .as_deref()
            .is_some_and(|p| p.as_os_str() == STDOUT_LOG)
    }
}

fn default_run_id() -> String {
    let secs = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    format!("run-{secs}")
}

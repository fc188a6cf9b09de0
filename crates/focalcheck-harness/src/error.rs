//! Harness error types.

use thiserror::Error;

/// A scenario could not build its fixtures. Ends that scenario only.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("fixture '{name}': {reason}")]
    Fixture { name: String, reason: String },
    #[error("resource '{what}' unavailable: {reason}")]
    Resource { what: String, reason: String },
}

impl SetupError {
    pub fn fixture(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Fixture {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn resource(what: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::Resource {
            what: what.into(),
            reason: reason.to_string(),
        }
    }
}

/// Failures of the harness itself (CLI, logging, suite selection).
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown suite '{0}'")]
    UnknownSuite(String),
    #[error("log {path} has {problems} schema problem(s)")]
    InvalidLog { path: String, problems: usize },
}

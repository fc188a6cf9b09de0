//! Table-driven scenario fixtures.

use serde::{Deserialize, Serialize};

use crate::error::{HarnessError, SetupError};

/// One row of a scenario table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureCase {
    /// Case identifier.
    pub name: String,
    /// Input parameters for the focal call.
    pub inputs: serde_json::Value,
    /// Expected observations.
    pub expected: serde_json::Value,
}

impl FixtureCase {
    /// Integer input `key`.
    pub fn input_i64(&self, key: &str) -> Result<i64, SetupError> {
        self.inputs
            .get(key)
            .and_then(serde_json::Value::as_i64)
            .ok_or_else(|| SetupError::fixture(&self.name, format!("missing integer input '{key}'")))
    }

    /// Boolean expectation `key`.
    pub fn expected_bool(&self, key: &str) -> Result<bool, SetupError> {
        self.expected
            .get(key)
            .and_then(serde_json::Value::as_bool)
            .ok_or_else(|| {
                SetupError::fixture(&self.name, format!("missing boolean expectation '{key}'"))
            })
    }

    /// Optional integer expectation `key`; absent means "not checked".
    #[must_use]
    pub fn expected_i64(&self, key: &str) -> Option<i64> {
        self.expected.get(key).and_then(serde_json::Value::as_i64)
    }
}

/// A scenario table for one focal method.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureSet {
    /// Schema version.
    pub version: String,
    /// Focal method the cases exercise.
    pub focal: String,
    pub cases: Vec<FixtureCase>,
}

impl FixtureSet {
    /// Load fixture set from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize fixture set to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load fixture set from a file path.
    pub fn from_file(path: &std::path::Path) -> Result<Self, HarnessError> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_accessors_report_missing_keys() {
        let set = FixtureSet::from_json(
            r#"{
                "version":"v1",
                "focal":"demo",
                "cases":[{"name":"only","inputs":{"n":3},"expected":{"ok":true,"v":9}}]
            }"#,
        )
        .expect("valid fixture json");
        let case = &set.cases[0];
        assert_eq!(case.input_i64("n").unwrap(), 3);
        assert!(case.expected_bool("ok").unwrap());
        assert_eq!(case.expected_i64("v"), Some(9));
        assert_eq!(case.expected_i64("absent"), None);

        let err = case.input_i64("m").unwrap_err();
        assert_eq!(err.to_string(), "fixture 'only': missing integer input 'm'");
    }
}

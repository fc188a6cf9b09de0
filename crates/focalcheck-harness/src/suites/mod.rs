//! Built-in focal-method suites.
//!
//! One module per focal method. Each exposes `suite()`, and every scenario
//! builds its own doubles.

pub mod lcms_float_output_tag;
pub mod pcap_mac8host;
pub mod png_component_loc;
pub mod sqlite_cache_size;
pub mod unity_float_special;
pub mod unity_int_array;
pub mod zip_get_short;

use focalcheck_core::unity::UnityOutput;

use crate::driver::Suite;
use crate::error::HarnessError;
use crate::mock::CallLog;

/// Unity output sink for the Unity suites: keeps the printed text and logs
/// the line of every failure report.
#[derive(Debug, Default)]
pub(crate) struct UnityCapture {
    pub text: String,
    pub fail_lines: CallLog<u32>,
}

impl UnityOutput for UnityCapture {
    fn fail_begin(&mut self, line: u32) {
        self.fail_lines.record(line);
    }

    fn print(&mut self, text: &str) {
        self.text.push_str(text);
    }
}

/// Every built-in suite, in run order.
#[must_use]
pub fn all() -> Vec<Suite> {
    vec![
        pcap_mac8host::suite(),
        unity_float_special::suite(),
        unity_int_array::suite(),
        png_component_loc::suite(),
        sqlite_cache_size::suite(),
        zip_get_short::suite(),
        lcms_float_output_tag::suite(),
    ]
}

#[must_use]
pub fn find(name: &str) -> Option<Suite> {
    all().into_iter().find(|suite| suite.name == name)
}

/// Suites named in `names`, in the given order. Empty selects everything.
pub fn select(names: &[String]) -> Result<Vec<Suite>, HarnessError> {
    if names.is_empty() {
        return Ok(all());
    }
    names
        .iter()
        .map(|name| find(name).ok_or_else(|| HarnessError::UnknownSuite(name.clone())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suite_names_are_unique() {
        let suites = all();
        let mut names: Vec<&str> = suites.iter().map(|s| s.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), suites.len());
        assert!(suites.iter().all(|s| (2..=12).contains(&s.scenarios.len())));
    }

    #[test]
    fn select_keeps_requested_order() {
        let picked = select(&["zip_get_short".to_string(), "png_component_loc".to_string()])
            .expect("known suites");
        let names: Vec<&str> = picked.iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["zip_get_short", "png_component_loc"]);
    }

    #[test]
    fn unknown_suite_is_an_error() {
        let err = select(&["nope".to_string()]).unwrap_err();
        assert!(matches!(err, HarnessError::UnknownSuite(ref n) if n == "nope"));
    }
}
